//! Sequential bit reader for parsing the compressed payload.
//!
//! ## Bit Ordering
//! Bits are read LSB-first within each byte:
//! - Bit position 0 in a byte is bit 0 (LSB)
//! - Bit position 7 in a byte is bit 7 (MSB)

#![allow(clippy::cast_possible_truncation)]

use crate::error::{HuffmanError, Result};

/// Sequential bit reader over a byte slice.
///
/// Only the first `num_bits` bits are readable; trailing padding is never
/// exposed.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    /// Source data.
    data: &'a [u8],
    /// Total number of bits available.
    num_bits: usize,
    /// Current bit position.
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new bit reader.
    ///
    /// # Panics
    /// Panics if `num_bits` exceeds the bits held by `data`.
    pub fn new(data: &'a [u8], num_bits: usize) -> Self {
        assert!(num_bits <= data.len() * 8);
        Self {
            data,
            num_bits,
            bit_pos: 0,
        }
    }

    /// Reader over `data` with the top `padding_bits` of the last byte
    /// excluded.
    pub fn with_padding(data: &'a [u8], padding_bits: u8) -> Result<Self> {
        let total = data.len() * 8;
        let padding = usize::from(padding_bits);
        if padding > 7 || padding > total {
            return Err(HuffmanError::CorruptPayload(format!(
                "{padding} padding bits in a {}-byte payload",
                data.len()
            )));
        }
        Ok(Self::new(data, total - padding))
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.bit_pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.num_bits.saturating_sub(self.bit_pos)
    }

    #[inline]
    pub fn has_bits(&self) -> bool {
        self.bit_pos < self.num_bits
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<u8> {
        if self.bit_pos >= self.num_bits {
            return Err(HuffmanError::Underflow);
        }

        let byte_index = self.bit_pos >> 3;
        let bit_index = self.bit_pos & 7;
        self.bit_pos += 1;
        Ok((self.data[byte_index] >> bit_index) & 1)
    }
}

impl Iterator for BitReader<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.read_bit().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}
