// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Activity indicator cadence.

/// A binary output that can be toggled, e.g. a status LED.
pub trait Indicator {
    fn toggle(&mut self);
}

impl<T: Indicator + ?Sized> Indicator for &mut T {
    #[inline]
    fn toggle(&mut self) {
        (**self).toggle()
    }
}

/// Tick divider producing one toggle request every `period` ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Blinker {
    period: u16,
    count: u16,
}

impl Blinker {
    pub const fn new(period: u16) -> Self {
        Self {
            period: if period == 0 { 1 } else { period },
            count: 0,
        }
    }

    #[inline]
    pub fn period(&self) -> u16 {
        self.period
    }

    /// Change the cadence. The next tick toggles immediately so the new rate is visible at once.
    pub fn set_period(&mut self, period: u16) {
        let period = period.max(1);
        if period != self.period {
            self.period = period;
            self.count = 0;
        }
    }

    /// Advance one tick; returns `true` when the indicator should toggle.
    pub fn tick(&mut self) -> bool {
        let toggle = self.count == 0;
        self.count += 1;
        if self.count >= self.period {
            self.count = 0;
        }
        toggle
    }
}
