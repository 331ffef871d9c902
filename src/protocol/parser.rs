// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line assembler for the command protocol.
//!
//! Bytes are collected until a terminator (`\0`, `\r` or `\n`). Empty lines are ignored, so a
//! `\r\n` pair yields a single line. A line longer than the buffer is dropped in full: the
//! remaining bytes are discarded up to the next terminator.

use crate::config::COMMAND_LINE_LEN;
use heapless::Vec;

pub type Line = Vec<u8, COMMAND_LINE_LEN>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum LineError {
    #[error("line exceeded {} bytes and was discarded", COMMAND_LINE_LEN)]
    TooLong,
}

#[inline]
fn is_terminator(byte: u8) -> bool {
    matches!(byte, 0 | b'\r' | b'\n')
}

enum State {
    Collecting,
    Discarding,
}

pub struct Parser {
    state: State,
    line: Line,
}

impl Parser {
    pub const fn new() -> Self {
        Self {
            state: State::Collecting,
            line: Vec::new(),
        }
    }

    /// Process a single incoming byte. Returns `Some` when a line ends.
    pub fn push(&mut self, byte: u8) -> Option<Result<Line, LineError>> {
        match self.state {
            State::Collecting => {
                if is_terminator(byte) {
                    if self.line.is_empty() {
                        return None;
                    }
                    return Some(Ok(core::mem::take(&mut self.line)));
                }
                if self.line.push(byte).is_err() {
                    self.line.clear();
                    self.state = State::Discarding;
                }
            }
            State::Discarding => {
                if is_terminator(byte) {
                    self.state = State::Collecting;
                    return Some(Err(LineError::TooLong));
                }
            }
        }
        None
    }

    /// Bytes collected for the line in progress.
    #[inline]
    pub fn pending(&self) -> usize {
        self.line.len()
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(parser: &mut Parser, bytes: &[u8]) -> heapless::Vec<Result<Line, LineError>, 8> {
        bytes.iter().filter_map(|&b| parser.push(b)).collect()
    }

    #[test]
    fn splits_on_every_terminator() {
        let mut p = Parser::new();
        let out = feed(&mut p, b"P\rF\nM1PWM5\0");
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].as_ref().unwrap().as_slice(), b"P");
        assert_eq!(out[1].as_ref().unwrap().as_slice(), b"F");
        assert_eq!(out[2].as_ref().unwrap().as_slice(), b"M1PWM5");
    }

    #[test]
    fn empty_lines_are_ignored() {
        let mut p = Parser::new();
        let out = feed(&mut p, b"\r\n\r\nP\r\n\n");
        assert_eq!(out.len(), 1);
        assert_eq!(p.pending(), 0);
    }

    #[test]
    fn overlong_line_is_dropped_whole() {
        let mut p = Parser::new();
        let mut input = heapless::Vec::<u8, 64>::new();
        input.extend_from_slice(&[b'9'; COMMAND_LINE_LEN + 5]).unwrap();
        input.extend_from_slice(b"\nP\n").unwrap();

        let out = feed(&mut p, &input);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], Err(LineError::TooLong));
        assert_eq!(out[1].as_ref().unwrap().as_slice(), b"P");
    }

    #[test]
    fn line_of_exact_capacity_is_kept() {
        let mut p = Parser::new();
        let mut input = heapless::Vec::<u8, 64>::new();
        input.extend_from_slice(&[b'A'; COMMAND_LINE_LEN]).unwrap();
        input.push(b'\r').unwrap();

        let out = feed(&mut p, &input);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].as_ref().unwrap().len(), COMMAND_LINE_LEN);
    }
}
