// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host serial link.
//!
//! Reception is interrupt driven: the USART RXNE interrupt calls [`receive`] which moves one byte
//! into the shared RX channel. Transmission is polled: the main loop calls [`SerialTx::service`]
//! every iteration, which hands at most one queued byte to the peripheral and never waits.
//!
//! To access the link on the host machine, connect to the USB-serial port and use
//! ```text
//! $ screen /dev/ttyUSB0 115200
//! ```

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Rx, Tx},
};

use crate::queue::{ByteQueue, SafeByteChannel};

pub struct SerialTx<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> SerialTx<U> {
    pub fn new(tx: Tx<U>) -> Self {
        Self { tx }
    }

    /// Send the oldest queued byte if the transmitter is ready. Returns `true` if a byte left.
    pub fn service<const N: usize>(&mut self, queue: &mut ByteQueue<N>) -> bool {
        match queue.send_front(|byte| self.tx.write(byte)) {
            Some(Ok(_)) => true,
            // WouldBlock: try again next iteration.
            None | Some(Err(nb::Error::WouldBlock)) => false,
            Some(Err(nb::Error::Other(_))) => {
                warn!("usart tx error, byte dropped");
                false
            }
        }
    }

    pub fn free(self) -> Tx<U> {
        self.tx
    }
}

/// Move one received byte into `channel`. Called from the USART interrupt only.
#[inline]
pub fn receive<U: Instance, const N: usize>(rx: &mut Rx<U>, channel: &SafeByteChannel<N>) {
    // Framing/overrun errors are cleared by the read; the byte is lost either way.
    if let Ok(byte) = rx.read() {
        channel.push(byte);
    }
}
