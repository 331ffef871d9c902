// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed-capacity byte queues for the serial link.
//!
//! - [`ByteQueue`] is a plain circular FIFO owned by a single context (the transmit side).
//! - [`SafeByteChannel`] wraps the same FIFO for the receive side, where the USART interrupt pushes
//!   and the main loop pops. Every access runs inside a critical section, so neither context can
//!   observe a half-updated index.
//!
//! Both queues keep the oldest data: pushing into a full queue drops the incoming byte and reports
//! `false`. There is no backpressure towards the remote sender.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Circular FIFO of bytes with capacity `N`.
pub struct ByteQueue<const N: usize> {
    buf: Deque<u8, N>,
    dropped: u16,
}

impl<const N: usize> ByteQueue<N> {
    pub const fn new() -> Self {
        Self {
            buf: Deque::new(),
            dropped: 0,
        }
    }

    /// Append a byte. Returns `false` (and drops the byte) if the queue is full.
    pub fn push(&mut self, byte: u8) -> bool {
        match self.buf.push_back(byte) {
            Ok(()) => true,
            Err(_) => {
                self.dropped = self.dropped.saturating_add(1);
                false
            }
        }
    }

    /// Append as much of `bytes` as fits, returning how many were queued.
    ///
    /// Stops at the first byte that does not fit; the remainder is not counted as dropped.
    pub fn push_slice(&mut self, bytes: &[u8]) -> usize {
        let room = self.free();
        for &b in &bytes[..bytes.len().min(room)] {
            // Cannot fail: bounded by `room`.
            let _ = self.buf.push_back(b);
        }
        bytes.len().min(room)
    }

    #[inline]
    pub fn pop(&mut self) -> Option<u8> {
        self.buf.pop_front()
    }

    /// Offer the oldest byte to a non-blocking `write`.
    ///
    /// The byte is removed once `write` accepts it and kept on `WouldBlock`. A hard error drops it
    /// and counts it in [`dropped`](Self::dropped). Returns `None` when there is nothing to send.
    pub fn send_front<E>(
        &mut self,
        write: impl FnOnce(u8) -> nb::Result<(), E>,
    ) -> Option<nb::Result<u8, E>> {
        let byte = self.peek()?;
        let result = write(byte);
        match result {
            Ok(()) => {
                self.buf.pop_front();
                Some(Ok(byte))
            }
            Err(nb::Error::WouldBlock) => Some(Err(nb::Error::WouldBlock)),
            Err(nb::Error::Other(e)) => {
                self.buf.pop_front();
                self.dropped = self.dropped.saturating_add(1);
                Some(Err(nb::Error::Other(e)))
            }
        }
    }

    /// Oldest byte without removing it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.buf.front().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.buf.is_full()
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn free(&self) -> usize {
        N - self.buf.len()
    }

    /// Bytes rejected because the queue was full (saturating).
    #[inline]
    pub fn dropped(&self) -> u16 {
        self.dropped
    }
}

impl<const N: usize> Default for ByteQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-producer (interrupt) / single-consumer (main loop) byte channel.
///
/// Meant to live in a `static`:
///
/// ```ignore
/// static RX: SafeByteChannel<16> = SafeByteChannel::new();
///
/// // USART RX interrupt
/// RX.push(byte);
///
/// // main loop
/// if let Some(byte) = RX.pop() { /* ... */ }
/// ```
pub struct SafeByteChannel<const N: usize> {
    inner: Mutex<RefCell<ByteQueue<N>>>,
}

impl<const N: usize> SafeByteChannel<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(ByteQueue::new())),
        }
    }

    /// Push a byte from the receive interrupt. Returns `false` if the byte was dropped.
    pub fn push(&self, byte: u8) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).push(byte))
    }

    /// Pop the oldest byte (main loop only).
    pub fn pop(&self) -> Option<u8> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).pop())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Total bytes dropped on overflow since startup (saturating).
    pub fn dropped(&self) -> u16 {
        critical_section::with(|cs| self.inner.borrow_ref(cs).dropped())
    }
}

impl<const N: usize> Default for SafeByteChannel<N> {
    fn default() -> Self {
        Self::new()
    }
}
