//! Variable-length bit buffer for building the compressed payload.
//!
//! Bits are appended sequentially and packed LSB-first, so completed bytes
//! can be drained to the output stream while encoding continues.
//!
//! ## Bit Ordering
//! Bits are appended LSB-first within each byte:
//! - First bit appended goes to bit position 0
//! - Second bit goes to position 1, etc.

#![allow(clippy::cast_possible_truncation)]

use std::io::Write;

use crate::code::Code;
use crate::error::Result;

/// Variable-length bit buffer for building compressed output.
///
/// Uses a 64-bit accumulator; at most 7 bits stay pending between appends.
#[derive(Clone, Debug, Default)]
pub struct BitBuffer {
    /// Completed bytes not yet drained.
    data: Vec<u8>,
    /// Total number of bits appended.
    num_bits: u64,
    /// Pending bits, first bit in the LSB.
    acc: u64,
    /// Number of bits in the accumulator.
    acc_len: usize,
}

impl BitBuffer {
    /// Create a new empty bit buffer.
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(1024),
            num_bits: 0,
            acc: 0,
            acc_len: 0,
        }
    }

    /// Total number of bits appended since creation.
    #[inline]
    pub fn len(&self) -> u64 {
        self.num_bits
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// Number of completed bytes waiting to be drained.
    #[inline]
    pub fn pending_bytes(&self) -> usize {
        self.data.len()
    }

    fn flush_acc(&mut self) {
        while self.acc_len >= 8 {
            self.data.push(self.acc as u8);
            self.acc >>= 8;
            self.acc_len -= 8;
        }
    }

    /// Append the low `num_bits` bits of `value`, bit 0 first.
    ///
    /// # Panics
    /// Panics if `num_bits` exceeds 32.
    pub fn append_value(&mut self, value: u32, num_bits: usize) {
        assert!(num_bits <= 32, "cannot append {num_bits} bits at once");
        if num_bits == 0 {
            return;
        }

        let mask = (1u64 << num_bits) - 1;
        self.acc |= (u64::from(value) & mask) << self.acc_len;
        self.acc_len += num_bits;
        self.num_bits += num_bits as u64;
        self.flush_acc();
    }

    /// Append every bit of a prefix code.
    pub fn append_code(&mut self, code: &Code) {
        for (chunk, n) in code.chunks() {
            self.append_value(chunk, n);
        }
    }

    /// Write completed bytes to `writer`; returns how many were written.
    pub fn drain_to<W: Write>(&mut self, writer: &mut W) -> Result<usize> {
        let n = self.data.len();
        if n > 0 {
            writer.write_all(&self.data)?;
            self.data.clear();
        }
        Ok(n)
    }

    /// Write remaining bytes, including a final partial byte whose unused
    /// high bits are zero. Returns how many bytes were written.
    pub fn finish<W: Write>(mut self, writer: &mut W) -> Result<usize> {
        if self.acc_len > 0 {
            self.data.push(self.acc as u8);
            self.acc = 0;
            self.acc_len = 0;
        }
        self.drain_to(writer)
    }

    /// Copy of all undrained bits as bytes, partial byte included.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.data.len() + 1);
        result.extend_from_slice(&self.data);
        if self.acc_len > 0 {
            result.push(self.acc as u8);
        }
        result
    }
}
