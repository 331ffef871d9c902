// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! Tick-driven logic run from the main loop.
//!
//! ## Modules
//!
//! - [`slew`] - Slew-rate limited, direction-aware PWM controller for all motor channels.
//! - [`supervisor`] - Communication-loss timeout and indicator cadence selection.
//! - [`indicator`] - Indicator trait and tick-based blink divider.

pub mod indicator;
pub mod slew;
pub mod supervisor;

pub use indicator::{Blinker, Indicator};
pub use slew::{slew_toward, MotorSlewController, TargetSet};
pub use supervisor::{CommTimeoutSupervisor, LinkState, SupervisorTick};
