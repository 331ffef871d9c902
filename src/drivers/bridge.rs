// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Actuation seam between the control loop and the bridge drivers.
//!
//! - [`HBridge`] is one physical bridge: a direction pair plus a PWM duty.
//! - [`MotorDriver`] is what the slew controller drives: one call per channel per tick.
//! - [`DriveBank`] is the fixed channel table that routes a logical channel to its bridge.

use crate::motors::{ChannelId, MotorCommand};

/// A single H-bridge channel.
pub trait HBridge {
    /// Drive the bridge. `command.magnitude` is in PWM units (`PWM_FULL_SCALE` = 100% duty).
    fn drive(&mut self, command: MotorCommand);
}

/// Something that can apply a command to any logical motor channel.
pub trait MotorDriver {
    fn apply(&mut self, channel: ChannelId, command: MotorCommand);
}

impl<T: MotorDriver + ?Sized> MotorDriver for &mut T {
    #[inline]
    fn apply(&mut self, channel: ChannelId, command: MotorCommand) {
        (**self).apply(channel, command)
    }
}

/// The four bridges of the platform, one field per channel number.
pub struct DriveBank<M0, M1, M2, M3> {
    pub m0: M0,
    pub m1: M1,
    pub m2: M2,
    pub m3: M3,
}

impl<M0, M1, M2, M3> DriveBank<M0, M1, M2, M3>
where
    M0: HBridge,
    M1: HBridge,
    M2: HBridge,
    M3: HBridge,
{
    pub fn new(m0: M0, m1: M1, m2: M2, m3: M3) -> Self {
        Self { m0, m1, m2, m3 }
    }

    pub fn free(self) -> (M0, M1, M2, M3) {
        (self.m0, self.m1, self.m2, self.m3)
    }
}

impl<M0, M1, M2, M3> MotorDriver for DriveBank<M0, M1, M2, M3>
where
    M0: HBridge,
    M1: HBridge,
    M2: HBridge,
    M3: HBridge,
{
    fn apply(&mut self, channel: ChannelId, command: MotorCommand) {
        match channel.index() {
            0 => self.m0.drive(command),
            1 => self.m1.drive(command),
            2 => self.m2.drive(command),
            3 => self.m3.drive(command),
            // ChannelId is always < MOTOR_COUNT.
            _ => {}
        }
    }
}

/// Duty value for `magnitude` on a timer whose full-scale duty is `max_duty`.
#[inline]
pub fn duty_for(magnitude: u8, full_scale: u8, max_duty: u16) -> u16 {
    if full_scale == 0 {
        return 0;
    }
    let magnitude = u32::from(magnitude.min(full_scale));
    (magnitude * u32::from(max_duty) / u32::from(full_scale)) as u16
}
