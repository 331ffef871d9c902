// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Rover Drive Firmware
//!
//! Firmware for the four-wheel rover drive controller, written in Rust, targeting an STM32F777 MCU
//! driving four VNH7040 H-bridges. A host computer sends text commands over a serial link; the
//! firmware ramps every motor toward its commanded speed and stops the platform when the host goes
//! quiet.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Compile-time constants and the runtime `DriveConfig` |
//! | [`queue`] | RX/TX byte queues shared with the USART interrupt |
//! | [`tick`] | Tick flag shared with the timer interrupt |
//! | [`motors`] | Motor commands, channel ids, wheel layout |
//! | [`control`] | Slew controller, link supervisor, indicator cadence |
//! | [`protocol`] | Line parser, command table, command handlers |
//! | [`drivers`] | Bridge traits and the VNH7040 driver |
//! | [`app`] | Main-loop runtime tying it all together |
//! | `hw` | MCU-level wrappers (MCU builds only) |
//!
//! Everything except `hw` and the VNH7040 driver also builds on the host, where it is tested.
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod motors;
pub mod protocol;
pub mod queue;
pub mod tick;

#[cfg(target_os = "none")]
pub mod hw;

pub use app::Firmware;
pub use config::DriveConfig;
