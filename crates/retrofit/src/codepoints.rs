//! UTF-8 byte runs to integer codepoints.
//!
//! Run length comes from the leading byte alone (`0xxxxxxx` = 1, `110xxxxx` = 2,
//! `1110xxxx` = 3, `11110xxx` = 4). The leading byte keeps its low `8 - (L + 1)` bits
//! (all bits for ASCII) and each continuation byte contributes its low 6 bits.
//! Overlong forms and surrogate codepoints are decoded as-is; nothing beyond the
//! run-length rule is validated.

use std::{fmt, iter::FusedIterator};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::exception::{ExcType, RunResult};

/// Codepoint emitted for malformed input under [`DecodePolicy::Lossy`].
pub const REPLACEMENT_CODEPOINT: u32 = 0xFFFD;

/// What the decoder does with a malformed byte run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecodePolicy {
    /// Yield one `UndefinedByteSequence` error and stop.
    #[default]
    Strict,
    /// Yield U+FFFD for the offending leading byte and resume at the next byte.
    Lossy,
}

/// Why a byte run could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunFault {
    /// A continuation byte, or `0xF8..=0xFF`, in leading position.
    InvalidLead(u8),
    /// Input ended inside a run.
    Truncated { expected: usize, found: usize },
    /// A byte inside a run lacks the `10xxxxxx` continuation marker.
    InvalidContinuation(u8),
}

impl fmt::Display for RunFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLead(byte) => write!(f, "invalid leading byte 0x{byte:02x}"),
            Self::Truncated { expected, found } => {
                write!(f, "truncated {expected}-byte sequence ({found} bytes available)")
            }
            Self::InvalidContinuation(byte) => write!(f, "invalid continuation byte 0x{byte:02x}"),
        }
    }
}

/// Returns a lazy sequence of the codepoints encoded in `bytes`, decoding strictly.
///
/// ```
/// let decoded: Vec<u32> = retrofit::codepoints("aé€😀".as_bytes()).collect::<Result<_, _>>().unwrap();
/// assert_eq!(decoded, vec![0x61, 0xE9, 0x20AC, 0x1F600]);
/// ```
#[must_use]
pub fn codepoints(bytes: &[u8]) -> Codepoints<'_> {
    Codepoints {
        bytes,
        pos: 0,
        policy: DecodePolicy::Strict,
        failed: false,
    }
}

/// Calls `f` for every codepoint and hands `bytes` back.
///
/// Codepoints before a strict-mode failure have already been delivered when the error returns.
pub fn each_codepoint(bytes: &[u8], policy: DecodePolicy, mut f: impl FnMut(u32)) -> RunResult<&[u8]> {
    for codepoint in codepoints(bytes).with_policy(policy) {
        f(codepoint?);
    }
    Ok(bytes)
}

/// Eagerly decodes `bytes` into a vector of codepoints.
pub fn decode_codepoints(bytes: &[u8], policy: DecodePolicy) -> RunResult<Vec<u32>> {
    codepoints(bytes).with_policy(policy).collect()
}

/// Pull-based UTF-8 decoder over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    pos: usize,
    policy: DecodePolicy,
    failed: bool,
}

impl Codepoints<'_> {
    #[must_use]
    pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Byte offset of the next run to decode.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }
}

impl Iterator for Codepoints<'_> {
    type Item = RunResult<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.bytes.len() {
            return None;
        }
        match decode_run(&self.bytes[self.pos..]) {
            Ok((codepoint, len)) => {
                self.pos += len;
                Some(Ok(codepoint))
            }
            Err(fault) => match self.policy {
                DecodePolicy::Strict => {
                    self.failed = true;
                    Some(Err(ExcType::undefined_byte_sequence(self.pos, fault)))
                }
                DecodePolicy::Lossy => {
                    trace!(offset = self.pos, %fault, "substituting replacement codepoint");
                    self.pos += 1;
                    Some(Ok(REPLACEMENT_CODEPOINT))
                }
            },
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.bytes.len() - self.pos;
        (remaining.div_ceil(4), Some(remaining))
    }
}

impl FusedIterator for Codepoints<'_> {}

/// Number of bytes in the run introduced by `lead`.
fn run_length(lead: u8) -> Option<usize> {
    match lead.leading_ones() {
        0 => Some(1),
        2 => Some(2),
        3 => Some(3),
        4 => Some(4),
        _ => None,
    }
}

/// Decodes the run at the start of `input`, returning the codepoint and the run length.
fn decode_run(input: &[u8]) -> Result<(u32, usize), RunFault> {
    let lead = input[0];
    let len = run_length(lead).ok_or(RunFault::InvalidLead(lead))?;
    if len == 1 {
        return Ok((u32::from(lead), 1));
    }
    let Some(continuation) = input.get(1..len) else {
        return Err(RunFault::Truncated {
            expected: len,
            found: input.len(),
        });
    };
    let mut codepoint = u32::from(lead & (0xFF >> (len + 1)));
    for &byte in continuation {
        if byte & 0xC0 != 0x80 {
            return Err(RunFault::InvalidContinuation(byte));
        }
        codepoint = (codepoint << 6) | u32::from(byte & 0x3F);
    }
    Ok((codepoint, len))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn run_lengths_follow_leading_bits() {
        assert_eq!(run_length(0x41), Some(1));
        assert_eq!(run_length(0xC3), Some(2));
        assert_eq!(run_length(0xE2), Some(3));
        assert_eq!(run_length(0xF0), Some(4));
        assert_eq!(run_length(0x80), None);
        assert_eq!(run_length(0xF8), None);
    }

    #[test]
    fn matches_std_for_valid_text() {
        let text = "ASCII, ünïcödé, 漢字, and 🦀 crabs";
        let expected: Vec<u32> = text.chars().map(u32::from).collect();
        assert_eq!(decode_codepoints(text.as_bytes(), DecodePolicy::Strict).unwrap(), expected);
    }

    #[test]
    fn overlong_forms_are_not_rejected() {
        assert_eq!(decode_codepoints(&[0xC0, 0xAF], DecodePolicy::Strict).unwrap(), vec![0x2F]);
    }

    #[test]
    fn strict_stops_after_first_fault() {
        let mut iter = codepoints(&[0x61, 0x80, 0x62]);
        assert_eq!(iter.next(), Some(Ok(0x61)));
        let err = iter.next().unwrap().unwrap_err();
        assert_eq!(err.exc_type(), ExcType::UndefinedByteSequence);
        assert_eq!(err.message(), Some("invalid leading byte 0x80 at byte offset 1"));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn lossy_replaces_and_resumes() {
        let decoded = decode_codepoints(&[0xE2, 0x41, 0xE2, 0x82], DecodePolicy::Lossy).unwrap();
        assert_eq!(decoded, vec![REPLACEMENT_CODEPOINT, 0x41, REPLACEMENT_CODEPOINT, REPLACEMENT_CODEPOINT]);
    }

    #[test]
    fn truncated_run_reports_lengths() {
        let err = decode_codepoints(&[0xF0, 0x9F], DecodePolicy::Strict).unwrap_err();
        assert_eq!(
            err.message(),
            Some("truncated 4-byte sequence (2 bytes available) at byte offset 0")
        );
    }
}
