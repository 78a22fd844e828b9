//! Error types for Huffman compression/decompression.

use thiserror::Error;

use crate::header::HEADER_LEN;

/// Errors that can occur during compression or decompression.
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// Underlying stream could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer header bytes than the fixed header size
    #[error("corrupt header: expected {expected} bytes, got {actual}")]
    CorruptHeader { expected: usize, actual: usize },

    /// Padding count stored in the header is outside 0-7
    #[error("invalid padding: {0} (must be 0-7)")]
    InvalidPadding(u8),

    /// Bitstream does not decode to a whole number of symbols
    #[error("corrupt payload: {0}")]
    CorruptPayload(String),

    /// Not enough bits remaining in input
    #[error("not enough bits remaining in input")]
    Underflow,
}

impl HuffmanError {
    pub(crate) fn truncated_header(actual: usize) -> Self {
        Self::CorruptHeader {
            expected: HEADER_LEN,
            actual,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HuffmanError>;
