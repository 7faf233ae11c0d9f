//! Error types for encoding operations.

use std::error::Error;
use std::fmt;

/// Result type for encoding operations.
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Errors that can occur while encoding a splice section to its wire format.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodingError {
    /// A computed field or section exceeded its allotted bit width or byte budget.
    BufferOverflow {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// A value could not be represented in the field's bit width.
    InvalidFieldValue {
        /// Name of the field with the invalid value.
        field: &'static str,
        /// String representation of the invalid value.
        value: String,
    },

    /// The number of bytes actually written diverged from the size computed
    /// up front for the same structure. This should never happen for a
    /// correctly implemented `Encodable`; surfacing it as an error rather
    /// than a silent truncation keeps `splice_command_length`/`section_length`
    /// trustworthy.
    SizeMismatch {
        /// Name of the structure being written.
        what: &'static str,
        /// Size computed by `encoded_size()`.
        computed: usize,
        /// Size actually written by `encode()`.
        written: usize,
    },
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::BufferOverflow { needed, available } => {
                write!(f, "buffer overflow: needed {} bytes, had {}", needed, available)
            }
            EncodingError::InvalidFieldValue { field, value } => {
                write!(f, "invalid field value: {} = {}", field, value)
            }
            EncodingError::SizeMismatch { what, computed, written } => {
                write!(
                    f,
                    "size mismatch for {}: computed {} bytes but wrote {}",
                    what, computed, written
                )
            }
        }
    }
}

impl Error for EncodingError {}
