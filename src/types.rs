//! The range-checked CompactSize value type

use crate::error::{CompactSizeError, Result};
use crate::serialization::compact_size::{
    compact_size_len, decode_compact_size, encode_compact_size,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// An unsigned integer in `[0, u64::MAX]` destined for the CompactSize wire form
///
/// Conversions from `u8`..`u64` are infallible. Conversions from signed
/// integers, `u128`, `usize` and decimal text go through `TryFrom`/`FromStr`
/// and reject anything outside the u64 range with
/// [`CompactSizeError::InvalidValue`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CompactSize(u64);

impl CompactSize {
    pub const MIN: CompactSize = CompactSize(0);
    pub const MAX: CompactSize = CompactSize(u64::MAX);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Canonical (shortest) wire encoding
    pub fn encode(self) -> Vec<u8> {
        encode_compact_size(self.0)
    }

    pub fn encoded_len(self) -> usize {
        compact_size_len(self.0)
    }

    /// Decode from the front of `data`, returning the value and bytes consumed
    pub fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let (value, consumed) = decode_compact_size(data)?;
        Ok((Self(value), consumed))
    }
}

impl fmt::Display for CompactSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CompactSize> for u64 {
    fn from(value: CompactSize) -> Self {
        value.0
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CompactSize {
                fn from(value: $t) -> Self {
                    Self(value as u64)
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64);

macro_rules! impl_try_from_signed {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for CompactSize {
                type Error = CompactSizeError;

                fn try_from(value: $t) -> Result<Self> {
                    if value < 0 {
                        return Err(negative(value));
                    }
                    u64::try_from(value).map(Self).map_err(|_| too_large(value))
                }
            }
        )*
    };
}

impl_try_from_signed!(i8, i16, i32, i64, i128, isize);

impl TryFrom<u128> for CompactSize {
    type Error = CompactSizeError;

    fn try_from(value: u128) -> Result<Self> {
        u64::try_from(value).map(Self).map_err(|_| too_large(value))
    }
}

impl TryFrom<usize> for CompactSize {
    type Error = CompactSizeError;

    fn try_from(value: usize) -> Result<Self> {
        u64::try_from(value).map(Self).map_err(|_| too_large(value))
    }
}

impl TryFrom<&str> for CompactSize {
    type Error = CompactSizeError;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

impl FromStr for CompactSize {
    type Err = CompactSizeError;

    /// Parse a base-10 integer, rejecting fractions, signs below zero and
    /// anything above `u64::MAX`
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let (negative_sign, digits) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CompactSizeError::InvalidValue(Cow::Owned(format!(
                "{text:?} is not an integer"
            ))));
        }

        if negative_sign {
            if digits.bytes().all(|b| b == b'0') {
                return Ok(Self(0));
            }
            return Err(negative(text));
        }

        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| too_large(text))
    }
}

fn negative(value: impl fmt::Display) -> CompactSizeError {
    CompactSizeError::InvalidValue(Cow::Owned(format!("{value} is negative")))
}

fn too_large(value: impl fmt::Display) -> CompactSizeError {
    CompactSizeError::InvalidValue(Cow::Owned(format!(
        "{value} exceeds u64 maximum ({})",
        u64::MAX
    )))
}
