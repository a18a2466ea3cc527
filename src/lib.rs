//! # CompactSize
//!
//! Bitcoin's CompactSize variable-length integer codec.
//!
//! CompactSize prefixes variable-length fields in the wire format (input and
//! output counts, script lengths, witness item sizes). Each value in
//! `[0, u64::MAX]` is written as 1, 3, 5 or 9 bytes:
//!
//! | value range | encoding |
//! |---|---|
//! | `0..=0xfc` | the value as one byte |
//! | `0xfd..=0xffff` | `0xfd` + 2 bytes little-endian |
//! | `0x10000..=0xffffffff` | `0xfe` + 4 bytes little-endian |
//! | `0x100000000..=u64::MAX` | `0xff` + 8 bytes little-endian |
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: encoding and decoding are deterministic, allocation-bounded
//!    and free of shared state, so any number of threads may call them concurrently
//! 2. **Strict Encode**: the encoder always emits the shortest form
//! 3. **Permissive Decode**: the decoder accepts non-minimal forms produced elsewhere
//! 4. **Checked Boundaries**: inputs that are not already `u64` are range-checked
//!    through [`CompactSize`] before encoding
//!
//! ## Usage
//!
//! ```rust
//! use compact_size::{decode_compact_size, encode_compact_size};
//!
//! let encoded = encode_compact_size(515);
//! assert_eq!(encoded, vec![0xfd, 0x03, 0x02]);
//!
//! let (value, consumed) = decode_compact_size(&encoded).unwrap();
//! assert_eq!((value, consumed), (515, 3));
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod serialization;
pub mod types;

pub use error::{CompactSizeError, Result};
pub use serialization::{
    compact_size_len, decode_compact_size, decode_length_prefixed, encode_compact_size,
    encode_length_prefixed, try_encode_compact_size, write_compact_size, write_length_prefixed,
};
pub use types::CompactSize;
