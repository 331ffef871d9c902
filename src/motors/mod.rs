// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Motor Model
//!
//! Types describing what each DC motor channel is asked to do, independent of the bridge driver
//! underneath.
//!
//! ## Modules
//!
//! - [`command`] - Direction + magnitude pair and the signed speed conversions.
//! - [`channel`] - Validated channel identifiers and per-channel state.
//! - [`layout`] - Wheel placement and the differential-drive mapping.

pub mod channel;
pub mod command;
pub mod layout;

pub use channel::{ChannelError, ChannelId, MotorChannel};
pub use command::{Direction, MotorCommand};
pub use layout::{differential, mount, Side, WheelMount, PLATFORM_LAYOUT};
