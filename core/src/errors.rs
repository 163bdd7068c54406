use thiserror::Error;

/// Errors that can arise while encoding, verifying, or decoding a payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("seal mismatch: provided seal does not match computed")]
    SealMismatch,
    #[error("field not found: {0}")]
    KeyNotFound(String),
    /// A `Data` entry with no `=` separator.
    #[error("malformed entry: {0:?}")]
    MalformedEntry(String),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}
