// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 drive controller board.

use stm32f7xx_hal::{
    gpio::{self, gpioa, gpiod, gpiof, Alternate, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOD, dp.GPIOE, dp.GPIOF);
/// ```
pub struct BoardPins {
    pub led: gpiod::PD10<Output<PushPull>>,
    pub usart1: Usart1Pins,
    pub pwm: PwmPins,
    pub m0: BridgePins<'E', 0, 'E', 1>,
    pub m1: BridgePins<'E', 2, 'E', 3>,
    pub m2: BridgePins<'E', 7, 'E', 8>,
    pub m3: BridgePins<'E', 9, 'E', 10>,
    pub diag: DiagPins,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// TIM4 PWM outputs, channel N drives motor N.
pub struct PwmPins {
    pub ch1: gpiod::PD12<Alternate<2>>,
    pub ch2: gpiod::PD13<Alternate<2>>,
    pub ch3: gpiod::PD14<Alternate<2>>,
    pub ch4: gpiod::PD15<Alternate<2>>,
}

/// VNH7040 direction inputs for one bridge.
pub struct BridgePins<const A_P: char, const A_N: u8, const B_P: char, const B_N: u8> {
    pub ina: gpio::Pin<A_P, A_N, Output<PushPull>>,
    pub inb: gpio::Pin<B_P, B_N, Output<PushPull>>,
}

/// Shared VNH7040 current-sense enable and diagnostic select.
pub struct DiagPins {
    pub sense_enable: gpiof::PF0<Output<PushPull>>,
    pub sel1: gpiof::PF1<Output<PushPull>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiod: pac::GPIOD, gpioe: pac::GPIOE, gpiof: pac::GPIOF) -> Self {
        let gpioa = gpioa.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();
        let gpiof = gpiof.split();

        Self {
            led: gpiod.pd10.into_push_pull_output(),

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            pwm: PwmPins {
                ch1: gpiod.pd12.into_alternate::<2>(),
                ch2: gpiod.pd13.into_alternate::<2>(),
                ch3: gpiod.pd14.into_alternate::<2>(),
                ch4: gpiod.pd15.into_alternate::<2>(),
            },

            m0: BridgePins {
                ina: gpioe.pe0.into_push_pull_output(),
                inb: gpioe.pe1.into_push_pull_output(),
            },
            m1: BridgePins {
                ina: gpioe.pe2.into_push_pull_output(),
                inb: gpioe.pe3.into_push_pull_output(),
            },
            m2: BridgePins {
                ina: gpioe.pe7.into_push_pull_output(),
                inb: gpioe.pe8.into_push_pull_output(),
            },
            m3: BridgePins {
                ina: gpioe.pe9.into_push_pull_output(),
                inb: gpioe.pe10.into_push_pull_output(),
            },

            diag: DiagPins {
                sense_enable: gpiof.pf0.into_push_pull_output(),
                sel1: gpiof.pf1.into_push_pull_output(),
            },
        }
    }
}
