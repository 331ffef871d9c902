// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command surface: everything a host can ask the drive controller to do.
//!
//! | Line        | Effect                                   |
//! | ----------- | ---------------------------------------- |
//! | `P`         | keep-alive                               |
//! | `F`         | reply with the identification string     |
//! | `M<i>PWM<s>`| set channel `i` to signed speed `s`      |
//! | `PWMR<r>L<l>` | set right and left platform speeds     |
//!
//! Every recognized command counts as a keep-alive, including one rejected for a bad channel.

use crate::config::{DriveConfig, TX_BUFFER_LEN};
use crate::control::{CommTimeoutSupervisor, TargetSet};
use crate::motors::{differential, ChannelId, Direction, MotorCommand};
use crate::protocol::table::{Arg, CommandError, CommandTable, PatternError};
use crate::queue::ByteQueue;

pub const KEEPALIVE: &str = "P";
pub const IDENTIFY: &str = "F";
pub const SET_CHANNEL_SPEED: &str = "M%SPWM%S";
pub const SET_PLATFORM_SPEED: &str = "PWMR%SL%S";

/// Capacity of the firmware's command table.
pub const COMMAND_SLOTS: usize = 8;

pub type DriveCommands = CommandTable<CommandSurface, COMMAND_SLOTS>;

/// State the command handlers may touch: targets, the link supervisor and the TX queue.
pub struct CommandSurface {
    targets: TargetSet,
    link: CommTimeoutSupervisor,
    tx: ByteQueue<TX_BUFFER_LEN>,
    max_magnitude: u8,
    identity: &'static [u8],
}

impl CommandSurface {
    pub fn new(config: &DriveConfig) -> Self {
        Self {
            targets: TargetSet::new(),
            link: CommTimeoutSupervisor::new(config),
            tx: ByteQueue::new(),
            max_magnitude: config.max_magnitude,
            identity: config.identity,
        }
    }

    pub fn keepalive(&mut self) {
        self.link.keepalive();
    }

    /// Queue the identification string. Bytes that do not fit are dropped.
    pub fn identify(&mut self) -> usize {
        self.link.keepalive();
        let sent = self.tx.push_slice(self.identity);
        if sent < self.identity.len() {
            debug!("identify truncated to {} bytes", sent);
        }
        sent
    }

    /// Set one channel's target. The sign selects the bridge direction directly.
    pub fn set_channel_speed(&mut self, channel: i16, speed: i16) -> Result<(), CommandError> {
        self.link.keepalive();
        let id = ChannelId::try_from(channel)?;
        let command = MotorCommand::from_speed(speed, Direction::Forward).limited(self.max_magnitude);
        self.targets.set(id, command);
        Ok(())
    }

    /// Set all targets from a differential request. Positive means forward on both sides.
    pub fn set_platform_speed(&mut self, right: i16, left: i16) {
        self.link.keepalive();
        let max = self.max_magnitude;
        self.targets
            .set_all(differential(right, left).map(|c| c.limited(max)));
    }

    #[inline]
    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    #[inline]
    pub fn link(&self) -> &CommTimeoutSupervisor {
        &self.link
    }

    #[inline]
    pub fn link_mut(&mut self) -> &mut CommTimeoutSupervisor {
        &mut self.link
    }

    #[inline]
    pub fn tx_mut(&mut self) -> &mut ByteQueue<TX_BUFFER_LEN> {
        &mut self.tx
    }
}

fn signed(args: &[Arg], index: u8) -> Result<i16, CommandError> {
    args.get(usize::from(index))
        .and_then(|a| a.as_i16())
        .ok_or(CommandError::Argument { index })
}

fn on_keepalive(surface: &mut CommandSurface, _args: &[Arg]) -> Result<(), CommandError> {
    surface.keepalive();
    Ok(())
}

fn on_identify(surface: &mut CommandSurface, _args: &[Arg]) -> Result<(), CommandError> {
    surface.identify();
    Ok(())
}

fn on_set_channel_speed(surface: &mut CommandSurface, args: &[Arg]) -> Result<(), CommandError> {
    surface.set_channel_speed(signed(args, 0)?, signed(args, 1)?)
}

fn on_set_platform_speed(surface: &mut CommandSurface, args: &[Arg]) -> Result<(), CommandError> {
    surface.set_platform_speed(signed(args, 0)?, signed(args, 1)?);
    Ok(())
}

/// Build the command table. Called once at startup.
pub fn register_commands(table: &mut DriveCommands) -> Result<(), PatternError> {
    table.register(KEEPALIVE, on_keepalive)?;
    table.register(IDENTIFY, on_identify)?;
    table.register(SET_CHANNEL_SPEED, on_set_channel_speed)?;
    table.register(SET_PLATFORM_SPEED, on_set_platform_speed)?;
    Ok(())
}
