//! Error types for netgate.

use thiserror::Error;

/// Errors that can occur when reading from a [`DataReader`](super::DataReader).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// Not enough bytes left in the payload.
    #[error("unexpected end of data: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        /// Bytes the read required.
        needed: usize,
        /// Bytes that were left.
        available: usize,
    },

    /// A length-prefixed string was not valid UTF-8.
    #[error("invalid utf-8 in string field")]
    InvalidUtf8,
}

/// Result type for payload reads.
pub type ReadResult<T> = Result<T, ReadError>;
