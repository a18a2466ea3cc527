//! CompactSize wire format constants
//!
//! The encoder and decoder both read their thresholds from this table, so the
//! boundaries one enforces are exactly the boundaries the other accepts.

/// Prefix sentinel for a 2-byte little-endian field
pub const PREFIX_U16: u8 = 0xfd;

/// Prefix sentinel for a 4-byte little-endian field
pub const PREFIX_U32: u8 = 0xfe;

/// Prefix sentinel for an 8-byte little-endian field
pub const PREFIX_U64: u8 = 0xff;

/// Largest value written as a single byte; every lead byte up to here is data
pub const MAX_SINGLE_BYTE: u8 = 0xfc;

/// Largest value written with the 0xfd prefix
pub const MAX_U16_FORM: u64 = u16::MAX as u64;

/// Largest value written with the 0xfe prefix
pub const MAX_U32_FORM: u64 = u32::MAX as u64;

/// Encoded length of the single-byte form
pub const SINGLE_BYTE_LEN: usize = 1;

/// Encoded length of the 0xfd form: prefix + 2 bytes
pub const U16_FORM_LEN: usize = 3;

/// Encoded length of the 0xfe form: prefix + 4 bytes
pub const U32_FORM_LEN: usize = 5;

/// Encoded length of the 0xff form: prefix + 8 bytes
pub const U64_FORM_LEN: usize = 9;

/// Longest possible CompactSize encoding
pub const MAX_ENCODED_LEN: usize = U64_FORM_LEN;
