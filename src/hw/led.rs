// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

use stm32f7xx_hal::gpio::{self, Output, PushPull};

use crate::control::Indicator;

/// Whether the LED is driven active-high or active-low on the board wiring.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}

/// LED abstraction that remembers its active level and last known state.
pub struct Led<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
    active: ActiveLevel,
    is_on: bool,
}

impl<const P: char, const N: u8> Led<P, N> {
    /// Create an LED wrapper, initializing it to OFF.
    pub fn new<MODE>(pin: gpio::Pin<P, N, MODE>, active: ActiveLevel) -> Self {
        let mut led = Self {
            pin: pin.into_push_pull_output(),
            active,
            is_on: true,
        };
        led.set(false);
        led
    }

    pub fn active_high<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    pub fn active_low<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    /// Drive the LED logically ON (true) or OFF (false).
    pub fn set(&mut self, on: bool) {
        match (self.active, on) {
            (ActiveLevel::High, true) | (ActiveLevel::Low, false) => self.pin.set_high(),
            (ActiveLevel::High, false) | (ActiveLevel::Low, true) => self.pin.set_low(),
        }
        self.is_on = on;
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn free(self) -> gpio::Pin<P, N, Output<PushPull>> {
        self.pin
    }
}

impl<const P: char, const N: u8> Indicator for Led<P, N> {
    fn toggle(&mut self) {
        self.set(!self.is_on);
    }
}
