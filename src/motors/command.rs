// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hardware-facing motor command: a direction plus an unsigned PWM magnitude.
//!
//! Command handlers work with signed speeds where the sign selects the direction. The conversions
//! take a `polarity`, the direction that a positive speed maps to, so that sides of the platform
//! wired the other way round can still use "positive = forward".
//!
//! A magnitude of zero carries no sign: [`MotorCommand::from_speed`] gives it the supplied
//! polarity, and [`MotorCommand::to_speed`] maps it to `0` whatever its direction.

/// Rotation direction as seen by the bridge inputs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// Logic levels for the bridge's (INA, INB) inputs.
    #[inline]
    pub fn bridge_inputs(self) -> (bool, bool) {
        match self {
            Direction::Forward => (false, true),
            Direction::Reverse => (true, false),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct MotorCommand {
    pub direction: Direction,
    /// PWM magnitude, 0 = stop.
    pub magnitude: u8,
}

impl MotorCommand {
    /// Forward, zero magnitude. The state every channel starts in.
    pub const STOP: Self = Self {
        direction: Direction::Forward,
        magnitude: 0,
    };

    #[inline]
    pub const fn new(direction: Direction, magnitude: u8) -> Self {
        Self {
            direction,
            magnitude,
        }
    }

    /// Convert a signed speed. Positive speeds map to `polarity`, negative ones to the opposite
    /// direction. The magnitude saturates at `u8::MAX`.
    pub fn from_speed(speed: i16, polarity: Direction) -> Self {
        let magnitude = u8::try_from(speed.unsigned_abs()).unwrap_or(u8::MAX);
        let direction = if speed < 0 {
            polarity.flipped()
        } else {
            polarity
        };
        Self {
            direction,
            magnitude,
        }
    }

    /// Inverse of [`from_speed`](Self::from_speed) for the same `polarity`.
    pub fn to_speed(self, polarity: Direction) -> i16 {
        let speed = i16::from(self.magnitude);
        if self.direction == polarity {
            speed
        } else {
            -speed
        }
    }

    /// Clamp the magnitude to `max`, keeping the direction.
    #[inline]
    pub fn limited(self, max: u8) -> Self {
        Self {
            magnitude: self.magnitude.min(max),
            ..self
        }
    }

    /// Same direction, zero magnitude.
    #[inline]
    pub fn stopped(self) -> Self {
        Self {
            magnitude: 0,
            ..self
        }
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.magnitude == 0
    }
}
