//! Compressed container header.
//!
//! ## Layout
//! - 256 x little-endian IEEE-754 `f32`: frequency of byte 0..=255
//! - 1 byte: unused high bits in the final payload byte (0-7)
//!
//! There is no magic number and no length prefix.

use std::io::{Read, Write};

use crate::error::{HuffmanError, Result};
use crate::frequency::{read_chunk, ByteFrequency, SYMBOLS};

/// Size of the frequency table on disk.
pub const FREQUENCY_TABLE_LEN: usize = SYMBOLS * 4;

/// Size of the whole header on disk.
pub const HEADER_LEN: usize = FREQUENCY_TABLE_LEN + 1;

/// Everything a decoder needs to rebuild the encoding tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub frequency: ByteFrequency,
    pub padding_bits: u8,
}

impl Header {
    pub fn new(frequency: ByteFrequency, padding_bits: u8) -> Self {
        Self {
            frequency,
            padding_bits,
        }
    }

    /// Serialize into a fixed-size buffer.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        for (slot, f) in bytes
            .chunks_exact_mut(4)
            .zip(self.frequency.as_table().iter())
        {
            slot.copy_from_slice(&f.to_le_bytes());
        }
        bytes[FREQUENCY_TABLE_LEN] = self.padding_bits;
        bytes
    }

    /// Parse from a buffer of exactly [`HEADER_LEN`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(HuffmanError::truncated_header(bytes.len()));
        }

        let mut table = [0.0f32; SYMBOLS];
        for (slot, raw) in table
            .iter_mut()
            .zip(bytes[..FREQUENCY_TABLE_LEN].chunks_exact(4))
        {
            *slot = f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
        }

        let padding_bits = bytes[FREQUENCY_TABLE_LEN];
        if padding_bits > 7 {
            return Err(HuffmanError::InvalidPadding(padding_bits));
        }

        Ok(Self::new(ByteFrequency::from_table(table), padding_bits))
    }

    /// Write the header; returns the number of bytes written.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<usize> {
        writer.write_all(&self.to_bytes())?;
        Ok(HEADER_LEN)
    }

    /// Read exactly one header from the front of `reader`.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_LEN];
        let mut filled = 0;

        while filled < HEADER_LEN {
            match read_chunk(reader, &mut bytes[filled..])? {
                0 => return Err(HuffmanError::truncated_header(filled)),
                n => filled += n,
            }
        }

        Self::from_bytes(&bytes)
    }
}
