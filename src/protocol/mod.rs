// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Command Protocol
//!
//! Text commands from the host computer, one per line.
//!
//! ## Modules
//!
//! - [`parser`] - Byte-by-byte line assembler.
//! - [`table`] - Pattern registration and dispatch.
//! - [`commands`] - The drive controller's commands and their handlers.

pub mod commands;
pub mod parser;
pub mod table;

pub use commands::{register_commands, CommandSurface, DriveCommands};
pub use parser::{Line, LineError, Parser};
pub use table::{Arg, CommandError, CommandTable, DispatchError, PatternError};
