// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! System tick flag shared between the tick timer interrupt and the main loop.
//!
//! The interrupt only raises the flag; all tick work runs in the main loop after
//! [`TickFlag::consume`] returns `true`. A tick that fires while the previous one is still pending
//! is coalesced into it and counted as an overrun.

use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

pub struct TickFlag {
    pending: AtomicBool,
    overruns: AtomicU16,
}

impl TickFlag {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            overruns: AtomicU16::new(0),
        }
    }

    /// Mark a tick as pending. Called from the timer interrupt.
    #[inline]
    pub fn raise(&self) {
        if self.pending.swap(true, Ordering::AcqRel) {
            // Wraps; only the change between two reads is meaningful.
            self.overruns.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Take the pending tick, if any. Returns `true` at most once per raised tick.
    #[inline]
    pub fn consume(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Ticks lost to coalescing since startup (wrapping).
    #[inline]
    pub fn overruns(&self) -> u16 {
        self.overruns.load(Ordering::Relaxed)
    }
}

impl Default for TickFlag {
    fn default() -> Self {
        Self::new()
    }
}
