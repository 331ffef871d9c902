// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command registration table.
//!
//! A pattern is a byte string of literals and placeholders:
//!
//! - `%S` – signed 16-bit decimal (`[+-]?[0-9]+`)
//! - `%U` – unsigned 16-bit decimal (`[0-9]+`)
//!
//! A line matches a pattern only if the whole line is consumed. Decoded placeholders are passed to
//! the handler in order as [`Arg`] values. Patterns are tried in registration order.

use crate::motors::ChannelError;
use heapless::Vec;

/// Most placeholders a single pattern may contain.
pub const MAX_ARGS: usize = 4;

/// A decoded placeholder value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Arg {
    Signed(i16),
    Unsigned(u16),
}

impl Arg {
    pub fn as_i16(self) -> Option<i16> {
        match self {
            Arg::Signed(v) => Some(v),
            Arg::Unsigned(v) => i16::try_from(v).ok(),
        }
    }
}

pub type Args = Vec<Arg, MAX_ARGS>;

/// Error returned by a command handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum CommandError {
    #[error(transparent)]
    Channel(#[from] ChannelError),
    /// Handler was registered under a pattern with the wrong placeholders.
    #[error("argument {index} is missing or has the wrong type")]
    Argument { index: u8 },
}

/// Why a pattern could not be registered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum PatternError {
    #[error("command table is full")]
    TableFull,
    #[error("pattern is empty")]
    Empty,
    #[error("pattern is already registered")]
    Duplicate,
    #[error("invalid placeholder at byte {position}")]
    BadPlaceholder { position: u8 },
    #[error("literal digit at byte {position} would be read as part of the number before it")]
    DigitAfterPlaceholder { position: u8 },
    #[error("pattern has more than {} placeholders", MAX_ARGS)]
    TooManyArgs,
    #[error("pattern contains a line terminator")]
    Terminator,
}

/// Why a complete line did not result in a successful handler call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum DispatchError {
    #[error("no command matches the line")]
    NoMatch,
    #[error("command `{pattern}` failed: {error}")]
    Handler {
        pattern: &'static str,
        error: CommandError,
    },
}

/// Handler signature: mutable context plus decoded arguments.
pub type Handler<C> = fn(&mut C, &[Arg]) -> Result<(), CommandError>;

struct Entry<C> {
    pattern: &'static str,
    handler: Handler<C>,
}

/// Fixed-capacity table of `{pattern, handler}` pairs over a context type `C`.
pub struct CommandTable<C, const N: usize> {
    entries: Vec<Entry<C>, N>,
}

impl<C, const N: usize> CommandTable<C, N> {
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add a command. Patterns are validated here, never at dispatch time.
    pub fn register(&mut self, pattern: &'static str, handler: Handler<C>) -> Result<(), PatternError> {
        validate(pattern.as_bytes())?;
        if self.entries.iter().any(|e| e.pattern == pattern) {
            return Err(PatternError::Duplicate);
        }
        self.entries
            .push(Entry { pattern, handler })
            .map_err(|_| PatternError::TableFull)?;
        debug!("registered command {}", pattern);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Match `line` against every pattern and run the first matching handler.
    ///
    /// Returns the matched pattern. A handler error is still a match: the command was recognized.
    pub fn dispatch(&self, line: &[u8], ctx: &mut C) -> Result<&'static str, DispatchError> {
        for entry in self.entries.iter() {
            let Some(args) = match_line(entry.pattern.as_bytes(), line) else {
                continue;
            };
            return match (entry.handler)(ctx, &args) {
                Ok(()) => Ok(entry.pattern),
                Err(error) => Err(DispatchError::Handler {
                    pattern: entry.pattern,
                    error,
                }),
            };
        }
        Err(DispatchError::NoMatch)
    }
}

impl<C, const N: usize> Default for CommandTable<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(pattern: &[u8]) -> Result<(), PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }
    let mut placeholders = 0;
    let mut i = 0;
    while i < pattern.len() {
        match pattern[i] {
            b'%' => {
                match pattern.get(i + 1) {
                    Some(b'S') | Some(b'U') => {}
                    _ => {
                        return Err(PatternError::BadPlaceholder {
                            position: u8::try_from(i).unwrap_or(u8::MAX),
                        })
                    }
                }
                // Numbers are read greedily: neither a digit nor another number may follow one.
                let next = u8::try_from(i + 2).unwrap_or(u8::MAX);
                match pattern.get(i + 2) {
                    Some(b'%') => return Err(PatternError::BadPlaceholder { position: next }),
                    Some(b) if b.is_ascii_digit() => {
                        return Err(PatternError::DigitAfterPlaceholder { position: next })
                    }
                    _ => {}
                }
                placeholders += 1;
                i += 2;
            }
            0 | b'\r' | b'\n' => return Err(PatternError::Terminator),
            _ => i += 1,
        }
    }
    if placeholders > MAX_ARGS {
        return Err(PatternError::TooManyArgs);
    }
    Ok(())
}

/// Match a whole line against a validated pattern, decoding placeholders.
fn match_line(pattern: &[u8], line: &[u8]) -> Option<Args> {
    let mut args = Args::new();
    let (mut p, mut l) = (0, 0);

    while p < pattern.len() {
        if pattern[p] == b'%' {
            let rest = &line[l..];
            let (arg, used) = match pattern[p + 1] {
                b'S' => parse_signed(rest).map(|(v, n)| (Arg::Signed(v), n))?,
                _ => parse_unsigned(rest).map(|(v, n)| (Arg::Unsigned(v), n))?,
            };
            args.push(arg).ok()?;
            l += used;
            p += 2;
        } else {
            if line.get(l) != Some(&pattern[p]) {
                return None;
            }
            p += 1;
            l += 1;
        }
    }

    (l == line.len()).then_some(args)
}

/// Leading decimal digits of `bytes` as a value, with the number of bytes used.
fn parse_digits(bytes: &[u8]) -> Option<(u32, usize)> {
    let mut value: u32 = 0;
    let mut used = 0;
    for &b in bytes.iter().take_while(|b| b.is_ascii_digit()) {
        value = value.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
        used += 1;
    }
    (used > 0).then_some((value, used))
}

fn parse_unsigned(bytes: &[u8]) -> Option<(u16, usize)> {
    let (value, used) = parse_digits(bytes)?;
    Some((u16::try_from(value).ok()?, used))
}

fn parse_signed(bytes: &[u8]) -> Option<(i16, usize)> {
    let (negative, skip) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };
    let (magnitude, used) = parse_digits(&bytes[skip..])?;
    let value = if negative {
        -i64::from(magnitude)
    } else {
        i64::from(magnitude)
    };
    Some((i16::try_from(value).ok()?, skip + used))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Calls {
        seen: Vec<(&'static str, Args), 8>,
    }

    fn ping(c: &mut Calls, args: &[Arg]) -> Result<(), CommandError> {
        c.seen.push(("P", Args::from_slice(args).unwrap())).unwrap();
        Ok(())
    }

    fn motor(c: &mut Calls, args: &[Arg]) -> Result<(), CommandError> {
        c.seen.push(("M", Args::from_slice(args).unwrap())).unwrap();
        Ok(())
    }

    fn platform(c: &mut Calls, args: &[Arg]) -> Result<(), CommandError> {
        c.seen.push(("PWMR", Args::from_slice(args).unwrap())).unwrap();
        Ok(())
    }

    fn failing(_: &mut Calls, _: &[Arg]) -> Result<(), CommandError> {
        Err(CommandError::Argument { index: 0 })
    }

    fn table() -> CommandTable<Calls, 4> {
        let mut t = CommandTable::new();
        t.register("P", ping).unwrap();
        t.register("M%SPWM%S", motor).unwrap();
        t.register("PWMR%SL%S", platform).unwrap();
        t
    }

    #[test]
    fn whole_line_must_match() {
        let t = table();
        let mut c = Calls::default();
        assert_eq!(t.dispatch(b"P", &mut c), Ok("P"));
        assert_eq!(t.dispatch(b"PX", &mut c), Err(DispatchError::NoMatch));
        assert_eq!(t.dispatch(b"PWMR", &mut c), Err(DispatchError::NoMatch));
        assert_eq!(c.seen.len(), 1);
    }

    #[test]
    fn decodes_signed_placeholders() {
        let t = table();
        let mut c = Calls::default();
        assert_eq!(t.dispatch(b"M2PWM-30", &mut c), Ok("M%SPWM%S"));
        assert_eq!(t.dispatch(b"PWMR+15L-200", &mut c), Ok("PWMR%SL%S"));
        assert_eq!(c.seen[0].1.as_slice(), &[Arg::Signed(2), Arg::Signed(-30)]);
        assert_eq!(c.seen[1].1.as_slice(), &[Arg::Signed(15), Arg::Signed(-200)]);
    }

    #[test]
    fn rejects_malformed_numbers() {
        let t = table();
        let mut c = Calls::default();
        let lines: [&[u8]; 6] = [b"M-PWM3", b"MPWM3", b"M1PWM", b"M1PWM40000", b"M1PWM-32769", b"M1PWM3x"];
        for line in lines {
            assert_eq!(t.dispatch(line, &mut c), Err(DispatchError::NoMatch), "{:?}", line);
        }
        assert!(c.seen.is_empty());
        assert_eq!(t.dispatch(b"M0PWM-32768", &mut c), Ok("M%SPWM%S"));
    }

    #[test]
    fn handler_errors_are_reported_with_pattern() {
        let mut t: CommandTable<Calls, 2> = CommandTable::new();
        t.register("F", failing).unwrap();
        assert_eq!(
            t.dispatch(b"F", &mut Calls::default()),
            Err(DispatchError::Handler {
                pattern: "F",
                error: CommandError::Argument { index: 0 }
            })
        );
    }

    #[test]
    fn registration_validates_patterns() {
        let mut t: CommandTable<Calls, 2> = CommandTable::new();
        assert_eq!(t.register("", ping), Err(PatternError::Empty));
        assert_eq!(t.register("A%X", ping), Err(PatternError::BadPlaceholder { position: 1 }));
        assert_eq!(t.register("A%", ping), Err(PatternError::BadPlaceholder { position: 1 }));
        assert_eq!(t.register("%S%S", ping), Err(PatternError::BadPlaceholder { position: 2 }));
        assert_eq!(t.register("A%S5", ping), Err(PatternError::DigitAfterPlaceholder { position: 3 }));
        assert_eq!(t.register("%U0L", ping), Err(PatternError::DigitAfterPlaceholder { position: 2 }));
        assert_eq!(t.register("%Sa%Sb%Sc%Sd%S", ping), Err(PatternError::TooManyArgs));
        assert_eq!(t.register("A\n", ping), Err(PatternError::Terminator));
        t.register("A", ping).unwrap();
        assert_eq!(t.register("A", ping), Err(PatternError::Duplicate));
        t.register("B%U", ping).unwrap();
        assert_eq!(t.register("C", ping), Err(PatternError::TableFull));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn unsigned_placeholder() {
        let mut t: CommandTable<Calls, 1> = CommandTable::new();
        t.register("D%U", ping).unwrap();
        let mut c = Calls::default();
        assert_eq!(t.dispatch(b"D65535", &mut c), Ok("D%U"));
        assert_eq!(t.dispatch(b"D-1", &mut c), Err(DispatchError::NoMatch));
        assert_eq!(c.seen[0].1.as_slice(), &[Arg::Unsigned(65535)]);
    }

    #[test]
    fn arg_conversions() {
        assert_eq!(Arg::Unsigned(40000).as_i16(), None);
        assert_eq!(Arg::Unsigned(7).as_i16(), Some(7));
    }
}
