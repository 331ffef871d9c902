// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Validated channel identifiers and the per-channel state snapshot.

use crate::config::MOTOR_COUNT;
use crate::motors::MotorCommand;

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum ChannelError {
    /// Index does not name an installed motor channel.
    #[error("motor channel {index} is not installed")]
    OutOfRange { index: i32 },
}

/// Index of an installed motor channel, always `< MOTOR_COUNT`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct ChannelId(u8);

impl ChannelId {
    /// Every channel in ascending order.
    pub const ALL: [ChannelId; MOTOR_COUNT] = {
        let mut all = [ChannelId(0); MOTOR_COUNT];
        let mut i = 0;
        while i < MOTOR_COUNT {
            all[i] = ChannelId(i as u8);
            i += 1;
        }
        all
    };

    pub fn new(index: usize) -> Result<Self, ChannelError> {
        if index < MOTOR_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(ChannelError::OutOfRange {
                index: i32::try_from(index).unwrap_or(i32::MAX),
            })
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i16> for ChannelId {
    type Error = ChannelError;

    fn try_from(index: i16) -> Result<Self, Self::Error> {
        usize::try_from(index)
            .map_err(|_| ChannelError::OutOfRange {
                index: i32::from(index),
            })
            .and_then(ChannelId::new)
    }
}

/// Commanded and driven state of one motor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MotorChannel {
    /// What the bridge is currently driven with.
    pub actual: MotorCommand,
    /// What the command surface last requested.
    pub target: MotorCommand,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_installed_channels_only() {
        for i in 0..MOTOR_COUNT {
            assert_eq!(ChannelId::new(i).map(ChannelId::index), Ok(i));
        }
        assert_eq!(
            ChannelId::new(MOTOR_COUNT),
            Err(ChannelError::OutOfRange { index: 4 })
        );
        assert_eq!(
            ChannelId::try_from(-1i16),
            Err(ChannelError::OutOfRange { index: -1 })
        );
        assert_eq!(ChannelId::try_from(3i16).map(ChannelId::index), Ok(3));
    }

    #[test]
    fn all_lists_every_channel() {
        assert_eq!(ChannelId::ALL.len(), MOTOR_COUNT);
        for (i, id) in ChannelId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(ChannelId::new(i), Ok(*id));
        }
    }
}
