//! Bitcoin CompactSize encoding/decoding
//!
//! CompactSize is the self-describing integer encoding Bitcoin's wire format
//! uses to prefix variable-length fields. It uses 1, 3, 5 or 9 bytes depending
//! on the value.
//!
//! Encoding rules:
//! - If value < 0xfd: single byte
//! - If value <= 0xffff: 0xfd prefix + 2 bytes (little-endian)
//! - If value <= 0xffffffff: 0xfe prefix + 4 bytes (little-endian)
//! - Otherwise: 0xff prefix + 8 bytes (little-endian)
//!
//! Encoding is strict: it always emits the shortest form. Decoding is
//! permissive: a non-minimal form written by another implementation
//! (e.g. `[0xfd, 0x00, 0x00]` for zero) is accepted as-is.

use crate::constants::{
    MAX_SINGLE_BYTE, MAX_U16_FORM, MAX_U32_FORM, PREFIX_U16, PREFIX_U32, PREFIX_U64,
    SINGLE_BYTE_LEN, U16_FORM_LEN, U32_FORM_LEN, U64_FORM_LEN,
};
use crate::error::{CompactSizeError, Result};
use crate::types::CompactSize;

/// Number of bytes `encode_compact_size(value)` produces
///
/// ```
/// use compact_size::serialization::compact_size::compact_size_len;
///
/// assert_eq!(compact_size_len(252), 1);
/// assert_eq!(compact_size_len(253), 3);
/// assert_eq!(compact_size_len(65536), 5);
/// assert_eq!(compact_size_len(4294967296), 9);
/// ```
#[inline]
pub fn compact_size_len(value: u64) -> usize {
    if value <= MAX_SINGLE_BYTE as u64 {
        SINGLE_BYTE_LEN
    } else if value <= MAX_U16_FORM {
        U16_FORM_LEN
    } else if value <= MAX_U32_FORM {
        U32_FORM_LEN
    } else {
        U64_FORM_LEN
    }
}

/// Append the canonical encoding of `value` to `out`
///
/// Returns the number of bytes written.
pub fn write_compact_size(out: &mut Vec<u8>, value: u64) -> usize {
    let start = out.len();

    if value <= MAX_SINGLE_BYTE as u64 {
        out.push(value as u8);
    } else if value <= MAX_U16_FORM {
        debug_assert!(
            value > MAX_SINGLE_BYTE as u64,
            "Value ({value}) must be >= 0xfd for 2-byte encoding"
        );
        out.push(PREFIX_U16);
        out.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= MAX_U32_FORM {
        debug_assert!(
            value > MAX_U16_FORM,
            "Value ({value}) must be > 0xffff for 4-byte encoding"
        );
        out.push(PREFIX_U32);
        out.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        debug_assert!(
            value > MAX_U32_FORM,
            "Value ({value}) must be > 0xffffffff for 8-byte encoding"
        );
        out.push(PREFIX_U64);
        out.extend_from_slice(&value.to_le_bytes());
    }

    let written = out.len() - start;
    debug_assert_eq!(
        written,
        compact_size_len(value),
        "CompactSize encoding of {value} wrote {written} bytes"
    );
    written
}

/// Encode a u64 value as a Bitcoin CompactSize
///
/// # Examples
///
/// ```
/// use compact_size::serialization::compact_size::encode_compact_size;
///
/// assert_eq!(encode_compact_size(0), vec![0]);
/// assert_eq!(encode_compact_size(252), vec![252]);
/// assert_eq!(encode_compact_size(253), vec![0xfd, 253, 0]);
/// assert_eq!(encode_compact_size(65535), vec![0xfd, 255, 255]);
/// assert_eq!(encode_compact_size(65536), vec![0xfe, 0, 0, 1, 0]);
/// ```
pub fn encode_compact_size(value: u64) -> Vec<u8> {
    let mut result = Vec::with_capacity(compact_size_len(value));
    write_compact_size(&mut result, value);
    result
}

/// Range-check `value` at the API boundary, then encode it
///
/// Accepts anything convertible into [`CompactSize`]: signed and wide
/// integers as well as decimal text. Values that are negative, non-integral
/// or above `u64::MAX` fail with [`CompactSizeError::InvalidValue`] and
/// nothing is encoded.
///
/// ```
/// use compact_size::serialization::compact_size::try_encode_compact_size;
///
/// assert_eq!(try_encode_compact_size(253i32), Ok(vec![0xfd, 253, 0]));
/// assert_eq!(try_encode_compact_size("65536"), Ok(vec![0xfe, 0, 0, 1, 0]));
/// assert!(try_encode_compact_size(-1i64).is_err());
/// assert!(try_encode_compact_size(1u128 << 64).is_err());
/// ```
pub fn try_encode_compact_size<T>(value: T) -> Result<Vec<u8>>
where
    T: TryInto<CompactSize>,
    CompactSizeError: From<T::Error>,
{
    let value = value.try_into()?;
    Ok(encode_compact_size(value.value()))
}

/// Decode a Bitcoin CompactSize from the front of `data`
///
/// Returns the decoded value and the number of bytes consumed. Bytes after
/// the consumed prefix are never inspected.
///
/// # Errors
///
/// Returns [`CompactSizeError::Truncated`] if `data` is empty or shorter than
/// its prefix byte declares.
///
/// # Examples
///
/// ```
/// use compact_size::serialization::compact_size::decode_compact_size;
///
/// assert_eq!(decode_compact_size(&[0]), Ok((0, 1)));
/// assert_eq!(decode_compact_size(&[252]), Ok((252, 1)));
/// assert_eq!(decode_compact_size(&[0xfd, 253, 0]), Ok((253, 3)));
/// assert_eq!(decode_compact_size(&[0xfd, 0, 0]), Ok((0, 3)));
/// assert_eq!(decode_compact_size(&[0xfe, 0, 0, 1, 0]), Ok((65536, 5)));
/// assert!(decode_compact_size(&[]).is_err());
/// ```
pub fn decode_compact_size(data: &[u8]) -> Result<(u64, usize)> {
    let Some(&first_byte) = data.first() else {
        return Err(CompactSizeError::Truncated {
            needed: SINGLE_BYTE_LEN,
            available: 0,
        });
    };

    // The four arms partition 0x00..=0xff; there is no invalid prefix.
    match first_byte {
        0..=MAX_SINGLE_BYTE => Ok((first_byte as u64, SINGLE_BYTE_LEN)),

        PREFIX_U16 => {
            require_len(data, U16_FORM_LEN)?;
            let value = u16::from_le_bytes([data[1], data[2]]) as u64;
            Ok((value, U16_FORM_LEN))
        }

        PREFIX_U32 => {
            require_len(data, U32_FORM_LEN)?;
            let value = u32::from_le_bytes([data[1], data[2], data[3], data[4]]) as u64;
            Ok((value, U32_FORM_LEN))
        }

        PREFIX_U64 => {
            require_len(data, U64_FORM_LEN)?;
            let value = u64::from_le_bytes([
                data[1], data[2], data[3], data[4], data[5], data[6], data[7], data[8],
            ]);
            Ok((value, U64_FORM_LEN))
        }
    }
}

#[inline]
fn require_len(data: &[u8], needed: usize) -> Result<()> {
    if data.len() < needed {
        return Err(CompactSizeError::Truncated {
            needed,
            available: data.len(),
        });
    }
    Ok(())
}
