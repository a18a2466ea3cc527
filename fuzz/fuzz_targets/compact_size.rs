#![no_main]
use compact_size::serialization::compact_size::{
    compact_size_len, decode_compact_size, encode_compact_size,
};
use compact_size::serialization::length_prefixed::decode_length_prefixed;
use compact_size::constants::MAX_ENCODED_LEN;
use compact_size::CompactSizeError;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decode: never reads past the buffer, never panics
    match decode_compact_size(data) {
        Ok((value, consumed)) => {
            assert!(consumed <= data.len(), "Consumed more bytes than available");
            assert!(consumed <= MAX_ENCODED_LEN);
            assert!(
                matches!(consumed, 1 | 3 | 5 | 9),
                "Consumed length must be 1, 3, 5 or 9"
            );

            // Canonical re-encoding is never longer than what was read
            let canonical = encode_compact_size(value);
            assert!(canonical.len() <= consumed, "Canonical form must be minimal");
            assert_eq!(canonical.len(), compact_size_len(value));
            assert_eq!(
                decode_compact_size(&canonical),
                Ok((value, canonical.len())),
                "Round-trip must preserve value"
            );
        }
        Err(CompactSizeError::Truncated { needed, available }) => {
            assert_eq!(available, data.len());
            assert!(needed > available);
        }
        Err(CompactSizeError::InvalidValue(_)) => {
            panic!("Decode must never report InvalidValue");
        }
    }

    if let Ok((payload, consumed)) = decode_length_prefixed(data) {
        assert!(consumed <= data.len());
        assert_eq!(&data[consumed - payload.len()..consumed], payload);
    }
});
