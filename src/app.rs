// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Cooperative main-loop runtime.
//!
//! [`Firmware`] owns everything outside interrupt context. Each [`poll`](Firmware::poll) does at
//! most one tick of work followed by at most one received byte, so no iteration ever blocks.

use crate::config::DriveConfig;
use crate::config::TX_BUFFER_LEN;
use crate::control::{CommTimeoutSupervisor, Indicator, MotorSlewController};
use crate::drivers::MotorDriver;
use crate::motors::{ChannelId, MotorChannel};
use crate::protocol::{register_commands, CommandSurface, DispatchError, DriveCommands, Parser, PatternError};
use crate::queue::{ByteQueue, SafeByteChannel};
use crate::tick::TickFlag;

pub struct Firmware<D: MotorDriver, L: Indicator> {
    commands: DriveCommands,
    parser: Parser,
    surface: CommandSurface,
    slew: MotorSlewController,
    driver: D,
    indicator: L,
    rx_dropped: u16,
    tick_overruns: u16,
}

impl<D: MotorDriver, L: Indicator> Firmware<D, L> {
    /// Build the command table and drive every channel to a stop.
    pub fn new(config: &DriveConfig, mut driver: D, indicator: L) -> Result<Self, PatternError> {
        let mut commands = DriveCommands::new();
        register_commands(&mut commands)?;

        let mut slew = MotorSlewController::new(config);
        slew.stop_all(&mut driver);

        info!(
            "drive ready: {} commands, step {}, limit {}, timeout {} ticks",
            commands.len(),
            config.max_step,
            config.max_magnitude,
            config.timeout_ticks
        );

        Ok(Self {
            commands,
            parser: Parser::new(),
            surface: CommandSurface::new(config),
            slew,
            driver,
            indicator,
            rx_dropped: 0,
            tick_overruns: 0,
        })
    }

    /// One main-loop iteration. Returns `true` if a tick was processed.
    pub fn poll<const N: usize>(&mut self, tick: &TickFlag, rx: &SafeByteChannel<N>) -> bool {
        let ticked = tick.consume();
        if ticked {
            self.tick();
            self.report_losses(tick, rx);
        }
        if let Some(byte) = rx.pop() {
            self.feed(byte);
        }
        ticked
    }

    /// Per-tick work: supervisor first, then the slew controller, then the indicator.
    pub fn tick(&mut self) {
        let status = self.surface.link_mut().tick();
        self.slew
            .update(self.surface.targets(), status.timed_out, &mut self.driver);
        if status.toggle_indicator {
            self.indicator.toggle();
        }
    }

    /// Hand one received byte to the parser and dispatch any completed line.
    pub fn feed(&mut self, byte: u8) {
        let line = match self.parser.push(byte) {
            None => return,
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                warn!("{}", e);
                return;
            }
        };

        match self.commands.dispatch(&line, &mut self.surface) {
            Ok(pattern) => debug!("command {}", pattern),
            Err(DispatchError::NoMatch) => warn!("unrecognized command ({} bytes)", line.len()),
            Err(DispatchError::Handler { pattern, error }) => {
                warn!("command {} rejected: {}", pattern, error)
            }
        }
    }

    fn report_losses<const N: usize>(&mut self, tick: &TickFlag, rx: &SafeByteChannel<N>) {
        let dropped = rx.dropped();
        if dropped != self.rx_dropped {
            warn!("rx overflow: {} bytes dropped", dropped.wrapping_sub(self.rx_dropped));
            self.rx_dropped = dropped;
        }
        let overruns = tick.overruns();
        if overruns != self.tick_overruns {
            warn!("tick overrun: {} ticks coalesced", overruns.wrapping_sub(self.tick_overruns));
            self.tick_overruns = overruns;
        }
    }

    /// Bytes waiting to be transmitted.
    #[inline]
    pub fn tx_mut(&mut self) -> &mut ByteQueue<TX_BUFFER_LEN> {
        self.surface.tx_mut()
    }

    pub fn channel(&self, channel: ChannelId) -> MotorChannel {
        self.slew.channel(channel, self.surface.targets())
    }

    #[inline]
    pub fn link(&self) -> &CommTimeoutSupervisor {
        self.surface.link()
    }

    #[inline]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    #[inline]
    pub fn indicator(&self) -> &L {
        &self.indicator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motors::{Direction, MotorCommand};

    #[derive(Default)]
    struct Outputs {
        last: [MotorCommand; 4],
        applies: u32,
    }

    impl MotorDriver for Outputs {
        fn apply(&mut self, channel: ChannelId, command: MotorCommand) {
            self.last[channel.index()] = command;
            self.applies += 1;
        }
    }

    #[derive(Default)]
    struct Toggles(u32);

    impl Indicator for Toggles {
        fn toggle(&mut self) {
            self.0 += 1;
        }
    }

    fn firmware() -> Firmware<Outputs, Toggles> {
        Firmware::new(&DriveConfig::new(), Outputs::default(), Toggles::default()).unwrap()
    }

    #[test]
    fn startup_stops_every_channel() {
        let fw = firmware();
        assert_eq!(fw.driver().applies, 4);
        assert!(fw.driver().last.iter().all(MotorCommand::is_stopped));
    }

    #[test]
    fn poll_without_tick_only_reads_bytes() {
        let mut fw = firmware();
        let tick = TickFlag::new();
        let rx = SafeByteChannel::<16>::new();
        for &b in b"M2PWM9\n" {
            rx.push(b);
        }
        for _ in 0..7 {
            assert!(!fw.poll(&tick, &rx));
        }
        assert!(rx.is_empty());
        let ch = ChannelId::new(2).unwrap();
        assert_eq!(fw.channel(ch).target, MotorCommand::new(Direction::Forward, 9));
        assert_eq!(fw.channel(ch).actual, MotorCommand::STOP);

        tick.raise();
        assert!(fw.poll(&tick, &rx));
        assert_eq!(fw.channel(ch).actual, MotorCommand::new(Direction::Forward, 1));
        assert_eq!(fw.driver().last[2], MotorCommand::new(Direction::Forward, 1));
    }

    #[test]
    fn one_byte_per_iteration() {
        let mut fw = firmware();
        let tick = TickFlag::new();
        let rx = SafeByteChannel::<16>::new();
        for &b in b"P\nP\n" {
            rx.push(b);
        }
        fw.poll(&tick, &rx);
        assert_eq!(rx.len(), 3);
    }

    #[test]
    fn indicator_blinks_on_first_tick_then_slowly() {
        let mut fw = firmware();
        for _ in 0..10 {
            fw.tick();
        }
        assert_eq!(fw.indicator().0, 1);
    }
}
