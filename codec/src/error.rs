//! Error types for codec operations

use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("unexpected tag: expected {expected:#04x}, found {found:#04x}")]
    UnexpectedTag { expected: u8, found: u8 },
    #[error("invalid length encoding")]
    InvalidLength,
    #[error("invalid integer encoding")]
    InvalidInteger,
    #[error("invalid utf-8 string")]
    InvalidUtf8,
    #[error("unexpected value in {0}")]
    UnexpectedValue(&'static str),
}
