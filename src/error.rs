//! Error types for CompactSize encoding and decoding

use std::borrow::Cow;
use std::convert::Infallible;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CompactSizeError {
    /// Encode-time: the input is negative, non-integral, or above `u64::MAX`
    #[error("Invalid value: {0}")]
    InvalidValue(Cow<'static, str>),

    /// Decode-time: fewer bytes are available than the prefix declares
    #[error("{}", truncation_message(.needed, .available))]
    Truncated { needed: usize, available: usize },
}

fn truncation_message(needed: &usize, available: &usize) -> String {
    if *available == 0 {
        "Truncated: no data to decode".to_string()
    } else {
        format!("Truncated: need {needed} bytes, only {available} available")
    }
}

impl From<Infallible> for CompactSizeError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

pub type Result<T> = std::result::Result<T, CompactSizeError>;
