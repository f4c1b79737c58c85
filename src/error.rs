//! Defines [`CodecError`], representing all errors returned by this crate.

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CodecError {
    /// A structural marker was expected but not found, or the input ended early.
    #[error("Malformed stream: {0}")]
    MalformedStream(String),

    /// A token is structurally valid but does not have the shape the element codec expects.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// No codec is registered for the requested value type.
    #[error("No element codec registered for type {0}")]
    UnresolvedElementCodec(&'static str),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// An encoded array body does not fit in its u32 length prefix.
    #[error("Overflow: array body does not fit in a u32 length prefix.")]
    Overflow,
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, CodecError>;
