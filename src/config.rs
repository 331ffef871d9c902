// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Platform constants and the runtime drive configuration.

/// Number of DC motor channels mounted on the platform.
pub const MOTOR_COUNT: usize = 4;

/// System tick rate produced by the tick timer.
pub const TICK_RATE_HZ: u32 = 500;

/// Capacity of the interrupt-fed receive queue.
pub const RX_BUFFER_LEN: usize = 16;
/// Capacity of the transmit queue drained by the main loop.
pub const TX_BUFFER_LEN: usize = 8;
/// Longest command line the parser will assemble.
pub const COMMAND_LINE_LEN: usize = 24;

/// Largest PWM magnitude a channel may be driven at.
pub const MAX_PWM: u8 = 50;
/// PWM increment per observed tick.
pub const SLEW_STEP: u8 = 1;
/// Magnitude corresponding to 100% duty at the bridge.
pub const PWM_FULL_SCALE: u8 = 255;

/// Ticks without a recognized command before the link is declared lost.
pub const LINK_TIMEOUT_TICKS: u16 = 50;
/// Indicator toggle period while the link is alive.
pub const BLINK_SLOW_TICKS: u16 = 100;
/// Indicator toggle period while the link is lost.
pub const BLINK_FAST_TICKS: u16 = 10;

/// Board signature returned by the identify command.
pub const IDENTITY: &[u8] = b"RoverDrive-4WD-B-00002";

/// Tunables shared by the slew controller, the link supervisor and the command handlers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DriveConfig {
    /// Maximum magnitude change per tick.
    pub max_step: u8,
    /// Upper bound for both target and actual magnitude.
    pub max_magnitude: u8,
    /// Ticks without a command before entering the timed-out state.
    pub timeout_ticks: u16,
    /// Indicator period in ticks while the link is alive.
    pub blink_slow_ticks: u16,
    /// Indicator period in ticks while the link is lost.
    pub blink_fast_ticks: u16,
    pub identity: &'static [u8],
}

impl DriveConfig {
    pub const fn new() -> Self {
        Self {
            max_step: SLEW_STEP,
            max_magnitude: MAX_PWM,
            timeout_ticks: LINK_TIMEOUT_TICKS,
            blink_slow_ticks: BLINK_SLOW_TICKS,
            blink_fast_ticks: BLINK_FAST_TICKS,
            identity: IDENTITY,
        }
    }

    /// Set the slew step. A step of zero would never converge and is raised to one.
    pub fn with_max_step(mut self, step: u8) -> Self {
        self.max_step = step.max(1);
        self
    }

    pub fn with_max_magnitude(mut self, max: u8) -> Self {
        self.max_magnitude = max;
        self
    }

    /// Set the link timeout threshold (at least one tick).
    pub fn with_timeout_ticks(mut self, ticks: u16) -> Self {
        self.timeout_ticks = ticks.max(1);
        self
    }

    /// Set the indicator periods (slow while alive, fast while timed out).
    pub fn with_blink_periods(mut self, slow: u16, fast: u16) -> Self {
        self.blink_slow_ticks = slow.max(1);
        self.blink_fast_ticks = fast.max(1);
        self
    }

    pub fn with_identity(mut self, identity: &'static [u8]) -> Self {
        self.identity = identity;
        self
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self::new()
    }
}
