// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! control loop.
//!
//! ## Existing drivers
//!
//! - [`bridge`] – `HBridge` / `MotorDriver` traits and the four-channel `DriveBank` table
//! - `vnh7040` – ST VNH7040 H-bridge with GPIO direction inputs and timer PWM (MCU only)

pub mod bridge;

#[cfg(target_os = "none")]
pub mod vnh7040;

pub use bridge::{DriveBank, HBridge, MotorDriver};

#[cfg(target_os = "none")]
pub use vnh7040::Vnh7040;
