//! Per-call size summary.

use std::fmt;

use crate::header::HEADER_LEN;

/// Byte counts reported by [`compress`](crate::compress) and
/// [`decompress`](crate::decompress).
///
/// Compression: `input_bytes` is the source size, `output_bytes` the payload
/// size. Decompression: `input_bytes` is the payload size, `output_bytes` the
/// restored size. The header is excluded from both and reported separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HuffmanStats {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub header_bytes: u64,
}

impl HuffmanStats {
    pub(crate) fn new(input_bytes: u64, output_bytes: u64) -> Self {
        Self {
            input_bytes,
            output_bytes,
            header_bytes: HEADER_LEN as u64,
        }
    }
}

impl fmt::Display for HuffmanStats {
    /// One value per line: input, output, header.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.input_bytes)?;
        writeln!(f, "{}", self.output_bytes)?;
        write!(f, "{}", self.header_bytes)
    }
}
