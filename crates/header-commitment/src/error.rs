use thiserror::Error;

/// Errors raised while normalizing header fields for hashing or display.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid field length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("hex quantity does not fit in 8 bytes: {0}")]
    QuantityOutOfRange(String),
}
