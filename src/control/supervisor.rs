// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Communication-loss supervisor.
//!
//! Counts ticks since the last recognized command. When the count reaches the configured
//! threshold the link is declared lost: the motors are stopped (see
//! [`MotorSlewController`](crate::control::MotorSlewController)) and the activity indicator blinks
//! fast. Only a recognized command ends the timeout; elapsed time never does.

use crate::config::DriveConfig;
use crate::control::indicator::Blinker;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum LinkState {
    Normal,
    TimedOut,
}

/// Result of one supervisor tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SupervisorTick {
    /// Timeout is active after this tick.
    pub timed_out: bool,
    /// This tick entered the timeout.
    pub entered_timeout: bool,
    /// The activity indicator should toggle.
    pub toggle_indicator: bool,
}

pub struct CommTimeoutSupervisor {
    timeout_ticks: u16,
    ticks_since_keepalive: u16,
    state: LinkState,
    slow: u16,
    fast: u16,
    blinker: Blinker,
}

impl CommTimeoutSupervisor {
    pub fn new(config: &DriveConfig) -> Self {
        Self {
            timeout_ticks: config.timeout_ticks.max(1),
            ticks_since_keepalive: 0,
            state: LinkState::Normal,
            slow: config.blink_slow_ticks,
            fast: config.blink_fast_ticks,
            blinker: Blinker::new(config.blink_slow_ticks),
        }
    }

    /// Record proof that the link is alive. Ends an active timeout.
    pub fn keepalive(&mut self) {
        self.ticks_since_keepalive = 0;
        if self.state == LinkState::TimedOut {
            self.state = LinkState::Normal;
            self.blinker.set_period(self.slow);
            info!("link restored");
        }
    }

    /// Count one tick. Must run before the slew controller reads [`is_timed_out`](Self::is_timed_out)
    /// for the same tick.
    pub fn tick(&mut self) -> SupervisorTick {
        self.ticks_since_keepalive = self
            .ticks_since_keepalive
            .saturating_add(1)
            .min(self.timeout_ticks);

        let mut entered_timeout = false;
        if self.ticks_since_keepalive >= self.timeout_ticks && self.state == LinkState::Normal {
            self.state = LinkState::TimedOut;
            self.blinker.set_period(self.fast);
            entered_timeout = true;
            warn!("link lost after {} ticks, stopping motors", self.timeout_ticks);
        }

        SupervisorTick {
            timed_out: self.is_timed_out(),
            entered_timeout,
            toggle_indicator: self.blinker.tick(),
        }
    }

    #[inline]
    pub fn state(&self) -> LinkState {
        self.state
    }

    #[inline]
    pub fn is_timed_out(&self) -> bool {
        self.state == LinkState::TimedOut
    }

    #[inline]
    pub fn ticks_since_keepalive(&self) -> u16 {
        self.ticks_since_keepalive
    }

    /// Current indicator period in ticks.
    #[inline]
    pub fn blink_period(&self) -> u16 {
        self.blinker.period()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supervisor(threshold: u16) -> CommTimeoutSupervisor {
        CommTimeoutSupervisor::new(&DriveConfig::new().with_timeout_ticks(threshold))
    }

    #[test]
    fn times_out_exactly_at_threshold() {
        let mut sup = supervisor(50);
        for _ in 1..50 {
            assert!(!sup.tick().timed_out);
        }
        let t = sup.tick();
        assert!(t.timed_out && t.entered_timeout);
        assert_eq!(sup.blink_period(), 10);
    }

    #[test]
    fn entry_is_reported_once_and_counter_saturates() {
        let mut sup = supervisor(3);
        let entries = (0..200).filter(|_| sup.tick().entered_timeout).count();
        assert_eq!(entries, 1);
        assert_eq!(sup.ticks_since_keepalive(), 3);
        assert_eq!(sup.state(), LinkState::TimedOut);
    }

    #[test]
    fn only_keepalive_recovers() {
        let mut sup = supervisor(5);
        for _ in 0..5 {
            sup.tick();
        }
        assert!(sup.is_timed_out());
        for _ in 0..1000 {
            assert!(sup.tick().timed_out);
        }
        sup.keepalive();
        assert_eq!(sup.state(), LinkState::Normal);
        assert_eq!(sup.blink_period(), 100);
        assert_eq!(sup.ticks_since_keepalive(), 0);
        assert!(!sup.tick().timed_out);
    }

    #[test]
    fn keepalive_restarts_the_window() {
        let mut sup = supervisor(10);
        for _ in 0..9 {
            sup.tick();
        }
        sup.keepalive();
        for _ in 0..9 {
            assert!(!sup.tick().timed_out);
        }
        assert!(sup.tick().entered_timeout);
    }

    #[test]
    fn timeout_re_entry_after_recovery() {
        let mut sup = supervisor(2);
        sup.tick();
        assert!(sup.tick().entered_timeout);
        sup.keepalive();
        sup.tick();
        assert!(sup.tick().entered_timeout);
    }
}
