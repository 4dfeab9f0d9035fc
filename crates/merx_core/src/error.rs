//! Error types for the artifact format

use std::io;
use thiserror::Error;

/// Errors raised while encoding or decoding an artifact
#[derive(Debug, Error)]
pub enum FormatError {
    /// Underlying I/O failure other than a short read
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The stream ended before a field could be read
    #[error("Unexpected end of artifact while reading {context}")]
    UnexpectedEof { context: &'static str },
    /// A tag byte outside the known range for its kind
    #[error("Invalid {kind} tag: {tag}")]
    InvalidTag { kind: &'static str, tag: u8 },
    /// The death-type byte has bits outside the six known flags
    #[error("Invalid death type bits: {0:#010b}")]
    InvalidDeathType(u8),
    /// A repeated section announced a negative element count
    #[error("Negative count {count} for {context}")]
    NegativeCount { context: &'static str, count: i32 },
    /// A string payload is not valid UTF-8
    #[error("Invalid UTF-8 in {context}")]
    InvalidUtf8 { context: &'static str },
    /// A 7-bit encoded string length ran past five bytes
    #[error("Malformed string length prefix")]
    MalformedLength,
    /// A string or list is too long to be length-prefixed
    #[error("Length {0} does not fit the artifact format")]
    TooLong(usize),
}

impl FormatError {
    /// Map a read failure, turning short reads into [`FormatError::UnexpectedEof`]
    pub fn from_read(err: io::Error, context: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof { context }
        } else {
            Self::Io(err)
        }
    }

    /// Whether this error means the artifact was cut short
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::UnexpectedEof { .. })
    }
}

/// Result type alias
pub type Result<T> = core::result::Result<T, FormatError>;
