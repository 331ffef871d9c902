// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Layer
//!
//! MCU-level wrappers for the STM32F777: board pins, the status LED, the host serial link and the
//! control tick timer.

pub mod led;
pub mod pins;
pub mod tick_timer;
pub mod usart;

pub use led::Led;
pub use pins::BoardPins;
pub use tick_timer::TickTimer;
pub use usart::SerialTx;
