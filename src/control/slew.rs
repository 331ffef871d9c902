// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Slew-rate limited, direction-aware PWM controller.
//!
//! Once per observed tick, [`MotorSlewController::update`] moves every channel's driven command
//! toward its target by at most `max_step`:
//!
//! - Same direction: ramp the magnitude toward the target, clamping exactly on arrival.
//! - Opposite direction: ramp down toward zero first. The direction only flips on a tick that
//!   starts at zero magnitude, and that tick already ramps up in the new direction.
//! - Link timed out: every channel is forced to zero magnitude (direction kept) regardless of its
//!   target, so ramping restarts from a stop once commands resume.
//!
//! Only the controller can change the driven (`actual`) commands; handlers write targets through
//! [`TargetSet`].

use crate::config::{DriveConfig, MOTOR_COUNT};
use crate::drivers::MotorDriver;
use crate::motors::{ChannelId, MotorChannel, MotorCommand};

/// Commanded state for every channel, written by the command handlers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetSet {
    targets: [MotorCommand; MOTOR_COUNT],
}

impl TargetSet {
    pub const fn new() -> Self {
        Self {
            targets: [MotorCommand::STOP; MOTOR_COUNT],
        }
    }

    #[inline]
    pub fn get(&self, channel: ChannelId) -> MotorCommand {
        self.targets[channel.index()]
    }

    #[inline]
    pub fn set(&mut self, channel: ChannelId, command: MotorCommand) {
        self.targets[channel.index()] = command;
    }

    pub fn set_all(&mut self, commands: [MotorCommand; MOTOR_COUNT]) {
        self.targets = commands;
    }
}

/// Advance `actual` one tick toward `target`.
pub fn slew_toward(actual: MotorCommand, target: MotorCommand, max_step: u8, max_magnitude: u8) -> MotorCommand {
    let mut next = actual;

    if target.direction != actual.direction {
        if actual.magnitude > 0 {
            next.magnitude = actual.magnitude.saturating_sub(max_step);
            return next;
        }
        // Bridge is idle: safe to reverse.
        next.direction = target.direction;
    }

    let goal = target.magnitude.min(max_magnitude);
    next.magnitude = if next.magnitude > goal {
        next.magnitude.saturating_sub(max_step).max(goal)
    } else {
        next.magnitude.saturating_add(max_step).min(goal)
    };
    next
}

pub struct MotorSlewController {
    actual: [MotorCommand; MOTOR_COUNT],
    max_step: u8,
    max_magnitude: u8,
}

impl MotorSlewController {
    pub fn new(config: &DriveConfig) -> Self {
        Self {
            actual: [MotorCommand::STOP; MOTOR_COUNT],
            max_step: config.max_step.max(1),
            max_magnitude: config.max_magnitude,
        }
    }

    /// Drive every channel to a stop immediately, without slewing.
    pub fn stop_all<D: MotorDriver>(&mut self, driver: &mut D) {
        for id in ChannelId::ALL {
            let stopped = self.actual[id.index()].stopped();
            driver.apply(id, stopped);
            self.actual[id.index()] = stopped;
        }
    }

    /// Run one tick for all channels and apply the result to `driver`.
    pub fn update<D: MotorDriver>(&mut self, targets: &TargetSet, timed_out: bool, driver: &mut D) {
        if timed_out {
            self.stop_all(driver);
            return;
        }

        for id in ChannelId::ALL {
            let actual = self.actual[id.index()];
            let next = slew_toward(actual, targets.get(id), self.max_step, self.max_magnitude);
            driver.apply(id, next);
            self.actual[id.index()] = next;
        }
    }

    #[inline]
    pub fn actual(&self, channel: ChannelId) -> MotorCommand {
        self.actual[channel.index()]
    }

    pub fn channel(&self, channel: ChannelId, targets: &TargetSet) -> MotorChannel {
        MotorChannel {
            actual: self.actual(channel),
            target: targets.get(channel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motors::Direction::{Forward, Reverse};

    fn cmd(direction: crate::motors::Direction, magnitude: u8) -> MotorCommand {
        MotorCommand::new(direction, magnitude)
    }

    /// Ticks until `actual` reaches `target`, checking the direction-flip rule on every step.
    fn ticks_to_converge(mut actual: MotorCommand, target: MotorCommand, step: u8) -> u32 {
        let mut ticks = 0;
        while actual != target {
            let next = slew_toward(actual, target, step, u8::MAX);
            if next.direction != actual.direction {
                assert_eq!(actual.magnitude, 0, "flipped from {:?}", actual);
            }
            assert!(next.magnitude.abs_diff(actual.magnitude) <= step);
            actual = next;
            ticks += 1;
            assert!(ticks < 1000);
        }
        ticks
    }

    #[test]
    fn ramps_up_one_step_per_tick() {
        assert_eq!(slew_toward(cmd(Forward, 0), cmd(Forward, 5), 1, 50), cmd(Forward, 1));
        assert_eq!(slew_toward(cmd(Forward, 4), cmd(Forward, 5), 3, 50), cmd(Forward, 5));
        assert_eq!(slew_toward(cmd(Forward, 9), cmd(Forward, 2), 3, 50), cmd(Forward, 6));
        assert_eq!(slew_toward(cmd(Forward, 3), cmd(Forward, 2), 3, 50), cmd(Forward, 2));
    }

    #[test]
    fn reversal_passes_through_zero() {
        // Still spinning forward: only slow down.
        assert_eq!(slew_toward(cmd(Forward, 2), cmd(Reverse, 5), 1, 50), cmd(Forward, 1));
        assert_eq!(slew_toward(cmd(Forward, 1), cmd(Reverse, 5), 4, 50), cmd(Forward, 0));
        // Stopped: flip and start ramping.
        assert_eq!(slew_toward(cmd(Forward, 0), cmd(Reverse, 5), 2, 50), cmd(Reverse, 2));
    }

    #[test]
    fn magnitude_never_exceeds_limit() {
        assert_eq!(slew_toward(cmd(Forward, 49), cmd(Forward, 200), 5, 50), cmd(Forward, 50));
        assert_eq!(slew_toward(cmd(Forward, 50), cmd(Forward, 200), 5, 50), cmd(Forward, 50));
        assert_eq!(slew_toward(cmd(Forward, 250), cmd(Forward, 255), 10, 255), cmd(Forward, 255));
    }

    #[test]
    fn convergence_tick_count() {
        for step in 1..=7u8 {
            for a in [0u8, 1, 9, 10, 33] {
                for t in [0u8, 1, 5, 30, 44] {
                    let same = ticks_to_converge(cmd(Forward, a), cmd(Forward, t), step);
                    assert_eq!(same, u32::from(a.abs_diff(t)).div_ceil(u32::from(step)));

                    let flip = ticks_to_converge(cmd(Forward, a), cmd(Reverse, t), step);
                    let down = u32::from(a).div_ceil(u32::from(step));
                    let up = u32::from(t).div_ceil(u32::from(step)).max(1);
                    // A flip at zero takes one tick even when the target is also zero.
                    assert_eq!(flip, down + up);
                }
            }
        }
    }

    #[test]
    fn fixed_point_is_stable() {
        let target = cmd(Reverse, 17);
        assert_eq!(slew_toward(target, target, 3, 50), target);
    }

    #[derive(Default)]
    struct Log {
        applied: heapless::Vec<(usize, MotorCommand), 16>,
    }

    impl MotorDriver for Log {
        fn apply(&mut self, channel: ChannelId, command: MotorCommand) {
            self.applied.push((channel.index(), command)).unwrap();
        }
    }

    #[test]
    fn timeout_forces_stop_and_keeps_direction() {
        let config = DriveConfig::new().with_max_step(10);
        let mut ctrl = MotorSlewController::new(&config);
        let mut targets = TargetSet::new();
        let ch = ChannelId::new(1).unwrap();
        targets.set(ch, cmd(Reverse, 40));

        let mut log = Log::default();
        ctrl.update(&targets, false, &mut log);
        ctrl.update(&targets, false, &mut log);
        assert_eq!(ctrl.actual(ch), cmd(Reverse, 20));

        let mut log = Log::default();
        ctrl.update(&targets, true, &mut log);
        assert_eq!(ctrl.actual(ch), cmd(Reverse, 0));
        assert_eq!(log.applied.len(), MOTOR_COUNT);
        assert!(log.applied.iter().all(|(_, c)| c.magnitude == 0));

        // Resumes from zero, not from the pre-timeout speed.
        ctrl.update(&targets, false, &mut log);
        assert_eq!(ctrl.actual(ch), cmd(Reverse, 10));
    }

    #[test]
    fn update_applies_every_channel_in_order() {
        let config = DriveConfig::new();
        let mut ctrl = MotorSlewController::new(&config);
        let mut log = Log::default();
        ctrl.update(&TargetSet::new(), false, &mut log);
        let order: heapless::Vec<usize, 16> = log.applied.iter().map(|(i, _)| *i).collect();
        assert_eq!(order.as_slice(), &[0, 1, 2, 3]);
    }
}
