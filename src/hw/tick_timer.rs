// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Periodic control tick on a general-purpose timer.
//!
//! The timer only raises [`TickFlag`]; everything else happens in the main loop.

use stm32f7xx_hal::{
    prelude::*,
    rcc::Clocks,
    timer::{CounterUs, Event, Instance, TimerExt},
};

use crate::config::TICK_RATE_HZ;
use crate::tick::TickFlag;

pub struct TickTimer<TIM: Instance> {
    counter: CounterUs<TIM>,
}

impl<TIM: Instance> TickTimer<TIM> {
    /// Start `tim` at [`TICK_RATE_HZ`] with the update interrupt enabled. The caller still has to
    /// unmask the interrupt in the NVIC.
    pub fn start(tim: TIM, clocks: &Clocks) -> Self
    where
        TIM: TimerExt,
    {
        let mut counter = tim.counter_us(clocks);
        // 500 Hz divides 1 MHz exactly, so the period is exact.
        let _ = counter.start((1_000_000 / TICK_RATE_HZ).micros());
        counter.listen(Event::Update);
        Self { counter }
    }

    /// Acknowledge the update interrupt and raise the tick. Called from the timer interrupt only.
    #[inline]
    pub fn on_interrupt(&mut self, flag: &TickFlag) {
        let _ = self.counter.wait();
        flag.raise();
    }
}
