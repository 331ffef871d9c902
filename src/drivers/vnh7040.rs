// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! ST VNH7040 full H-bridge driver.
//!
//! Each bridge is controlled by two GPIO direction inputs (INA, INB) and one PWM input. The shared
//! SENSE-enable and SEL1 lines are configured once for all bridges by [`configure_diagnostics`].
//!
//! | INA | INB | Result |
//! | --- | --- | ------ |
//! | 0   | 1   | Forward |
//! | 1   | 0   | Reverse |

use crate::config::PWM_FULL_SCALE;
use crate::drivers::bridge::{duty_for, HBridge};
use crate::motors::MotorCommand;

use stm32f7xx_hal::{
    gpio::{self, Output, PushPull},
    prelude::*,
};

/// One VNH7040 bridge.
pub struct Vnh7040<
    const INA_P: char,
    const INA_N: u8,
    const INB_P: char,
    const INB_N: u8,
    Pwm,
> {
    ina: gpio::Pin<INA_P, INA_N, Output<PushPull>>,
    inb: gpio::Pin<INB_P, INB_N, Output<PushPull>>,
    pwm: Pwm,
}

impl<const INA_P: char, const INA_N: u8, const INB_P: char, const INB_N: u8, Pwm>
    Vnh7040<INA_P, INA_N, INB_P, INB_N, Pwm>
where
    Pwm: _embedded_hal_PwmPin<Duty = u16>,
{
    /// Take ownership of the bridge lines and leave the bridge stopped in the forward direction.
    pub fn new<AMode, BMode>(
        ina: gpio::Pin<INA_P, INA_N, AMode>,
        inb: gpio::Pin<INB_P, INB_N, BMode>,
        mut pwm: Pwm,
    ) -> Self {
        pwm.set_duty(0);
        pwm.enable();

        let mut bridge = Self {
            ina: ina.into_push_pull_output(),
            inb: inb.into_push_pull_output(),
            pwm,
        };
        bridge.drive(MotorCommand::STOP);
        bridge
    }

    pub fn free(
        self,
    ) -> (
        gpio::Pin<INA_P, INA_N, Output<PushPull>>,
        gpio::Pin<INB_P, INB_N, Output<PushPull>>,
        Pwm,
    ) {
        (self.ina, self.inb, self.pwm)
    }
}

impl<const INA_P: char, const INA_N: u8, const INB_P: char, const INB_N: u8, Pwm> HBridge
    for Vnh7040<INA_P, INA_N, INB_P, INB_N, Pwm>
where
    Pwm: _embedded_hal_PwmPin<Duty = u16>,
{
    fn drive(&mut self, command: MotorCommand) {
        let (ina, inb) = command.direction.bridge_inputs();
        if ina {
            self.ina.set_high();
        } else {
            self.ina.set_low();
        }
        if inb {
            self.inb.set_high();
        } else {
            self.inb.set_low();
        }

        let duty = duty_for(command.magnitude, PWM_FULL_SCALE, self.pwm.get_max_duty());
        self.pwm.set_duty(duty);
    }
}

/// Enable the current-sense output and select normal (non-diagnostic) mode on all bridges.
pub fn configure_diagnostics<const SEN_P: char, const SEN_N: u8, const SEL_P: char, const SEL_N: u8>(
    sense_enable: &mut gpio::Pin<SEN_P, SEN_N, Output<PushPull>>,
    sel1: &mut gpio::Pin<SEL_P, SEL_N, Output<PushPull>>,
) {
    sense_enable.set_high();
    sel1.set_low();
}
