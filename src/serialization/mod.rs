//! Bitcoin wire format CompactSize serialization/deserialization
//!
//! Byte layouts here must match Bitcoin Core's wire format exactly.
//! All multi-byte integers are little-endian (Bitcoin standard).

pub mod compact_size;
pub mod length_prefixed;

pub use compact_size::{
    compact_size_len, decode_compact_size, encode_compact_size, try_encode_compact_size,
    write_compact_size,
};
pub use length_prefixed::{decode_length_prefixed, encode_length_prefixed, write_length_prefixed};
