//! CompactSize length-prefixed byte fields
//!
//! Variable-length wire fields (scripts, witness items, user agents) are
//! written as a CompactSize byte count followed by that many bytes.

use super::compact_size::{compact_size_len, decode_compact_size, write_compact_size};
use crate::error::{CompactSizeError, Result};

/// Append `payload` to `out` behind its CompactSize length
///
/// Returns the total number of bytes written (prefix + payload).
pub fn write_length_prefixed(out: &mut Vec<u8>, payload: &[u8]) -> usize {
    let prefix_len = write_compact_size(out, payload.len() as u64);
    out.extend_from_slice(payload);
    prefix_len + payload.len()
}

/// Serialize `payload` as a CompactSize length followed by the payload bytes
///
/// ```
/// use compact_size::serialization::length_prefixed::encode_length_prefixed;
///
/// assert_eq!(encode_length_prefixed(&[0xab, 0xcd]), vec![2, 0xab, 0xcd]);
/// assert_eq!(encode_length_prefixed(&[]), vec![0]);
/// ```
pub fn encode_length_prefixed(payload: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(compact_size_len(payload.len() as u64) + payload.len());
    write_length_prefixed(&mut result, payload);
    result
}

/// Borrow a length-prefixed field from the front of `data`
///
/// Returns the payload slice and the total bytes consumed (prefix + payload).
/// Bytes past the declared field are never touched.
///
/// # Errors
///
/// Returns [`CompactSizeError::Truncated`] if the prefix itself is
/// incomplete or if fewer payload bytes follow than the prefix declares.
pub fn decode_length_prefixed(data: &[u8]) -> Result<(&[u8], usize)> {
    let (declared, prefix_len) = decode_compact_size(data)?;

    let total = usize::try_from(declared)
        .ok()
        .and_then(|len| prefix_len.checked_add(len));

    match total {
        Some(total) if total <= data.len() => Ok((&data[prefix_len..total], total)),
        _ => Err(CompactSizeError::Truncated {
            needed: total.unwrap_or(usize::MAX),
            available: data.len(),
        }),
    }
}
