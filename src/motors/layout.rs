// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Physical arrangement of the four drive motors.
//!
//! Channels are numbered like an IC with the dot at the back, viewed from the top:
//!
//! ```text
//!          Left   Right
//! Front     2      1
//! Rear      3      0
//! ```
//!
//! The right-hand motors are mounted mirrored, so a positive (forward) platform speed drives them
//! in [`Direction::Reverse`].

use crate::config::MOTOR_COUNT;
use crate::motors::{ChannelId, Direction, MotorCommand};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

/// Where a channel sits and which bridge direction moves the platform forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WheelMount {
    pub side: Side,
    pub forward: Direction,
}

/// Indexed by channel number.
pub const PLATFORM_LAYOUT: [WheelMount; MOTOR_COUNT] = [
    WheelMount { side: Side::Right, forward: Direction::Reverse },
    WheelMount { side: Side::Right, forward: Direction::Reverse },
    WheelMount { side: Side::Left, forward: Direction::Forward },
    WheelMount { side: Side::Left, forward: Direction::Forward },
];

#[inline]
pub fn mount(channel: ChannelId) -> WheelMount {
    PLATFORM_LAYOUT[channel.index()]
}

/// Per-channel commands for a differential drive request. Positive speeds mean forward on both
/// sides.
pub fn differential(right: i16, left: i16) -> [MotorCommand; MOTOR_COUNT] {
    ChannelId::ALL.map(|id| {
        let wheel = mount(id);
        let speed = match wheel.side {
            Side::Right => right,
            Side::Left => left,
        };
        MotorCommand::from_speed(speed, wheel.forward)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_drives_right_side_reversed() {
        let cmds = differential(20, 20);
        assert_eq!(cmds[0], MotorCommand::new(Direction::Reverse, 20));
        assert_eq!(cmds[1], MotorCommand::new(Direction::Reverse, 20));
        assert_eq!(cmds[2], MotorCommand::new(Direction::Forward, 20));
        assert_eq!(cmds[3], MotorCommand::new(Direction::Forward, 20));
    }

    #[test]
    fn sides_are_independent() {
        let cmds = differential(-7, 9);
        assert_eq!(cmds[0], MotorCommand::new(Direction::Forward, 7));
        assert_eq!(cmds[1], MotorCommand::new(Direction::Forward, 7));
        assert_eq!(cmds[2], MotorCommand::new(Direction::Forward, 9));
        assert_eq!(cmds[3], MotorCommand::new(Direction::Forward, 9));
    }

    #[test]
    fn platform_speed_round_trips_per_channel() {
        let cmds = differential(-15, 33);
        for id in ChannelId::ALL {
            let wheel = mount(id);
            let expected = if wheel.side == Side::Right { -15 } else { 33 };
            assert_eq!(cmds[id.index()].to_speed(wheel.forward), expected);
        }
    }
}
