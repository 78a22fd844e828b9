//! Byte occurrence counting and normalization.
//!
//! The measuring pass produces absolute [`ByteCounts`]; the header persists
//! the normalized [`ByteFrequency`] so a decoder can rebuild the same tree.

#![allow(clippy::cast_precision_loss)]

use std::io::{ErrorKind, Read};

use crate::error::Result;

/// Number of distinct byte values.
pub const SYMBOLS: usize = 256;

/// Chunk size for streaming reads and writes.
pub(crate) const CHUNK_SIZE: usize = 64 * 1024;

/// Fill some of `buf` from `reader`, retrying on `Interrupted`.
///
/// Returns 0 only at end of stream.
pub(crate) fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
}

/// Absolute occurrence count of every byte value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteCounts {
    counts: [u64; SYMBOLS],
    total: u64,
}

impl Default for ByteCounts {
    fn default() -> Self {
        Self {
            counts: [0; SYMBOLS],
            total: 0,
        }
    }
}

impl ByteCounts {
    /// Count the bytes of an in-memory buffer.
    pub fn of(data: &[u8]) -> Self {
        let mut counts = Self::default();
        counts.add(data);
        counts
    }

    /// Count every byte of `reader` until end of stream.
    pub fn measure<R: Read>(reader: &mut R) -> Result<Self> {
        let mut counts = Self::default();
        let mut chunk = vec![0u8; CHUNK_SIZE];

        loop {
            let n = read_chunk(reader, &mut chunk)?;
            if n == 0 {
                break;
            }
            counts.add(&chunk[..n]);
        }

        Ok(counts)
    }

    /// Accumulate another slice of input.
    pub fn add(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
        self.total += data.len() as u64;
    }

    /// Occurrences of `byte`.
    #[inline]
    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Total number of bytes counted.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of byte values that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Normalize to probabilities.
    ///
    /// An empty input has no defined distribution; every entry is `0.0`
    /// rather than `0/0`.
    pub fn frequency(&self) -> ByteFrequency {
        let mut table = [0.0f32; SYMBOLS];
        if self.total > 0 {
            let total = self.total as f32;
            for (slot, &count) in table.iter_mut().zip(self.counts.iter()) {
                *slot = count as f32 / total;
            }
        }
        ByteFrequency(table)
    }
}

/// Relative frequency of every byte value, as stored in the header.
#[derive(Clone, Debug, PartialEq)]
pub struct ByteFrequency([f32; SYMBOLS]);

impl Default for ByteFrequency {
    fn default() -> Self {
        Self([0.0; SYMBOLS])
    }
}

impl ByteFrequency {
    pub fn from_table(table: [f32; SYMBOLS]) -> Self {
        Self(table)
    }

    #[inline]
    pub fn get(&self, byte: u8) -> f32 {
        self.0[byte as usize]
    }

    pub fn as_table(&self) -> &[f32; SYMBOLS] {
        &self.0
    }

    /// Sum of all probabilities (1.0 up to rounding for non-empty input).
    pub fn sum(&self) -> f32 {
        self.0.iter().sum()
    }
}
