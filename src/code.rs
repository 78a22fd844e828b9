//! Prefix codes derived from a [`HuffmanTree`].
//!
//! ## Bit Numbering
//! Bit `i` of a [`Code`] is the branch taken at depth `i` of the tree
//! (0 = child 0, 1 = child 1). Bits are stored LSB-first in four 64-bit
//! words, which covers the deepest possible path in a 256-leaf tree.

#![allow(clippy::cast_possible_truncation)]

use crate::frequency::{ByteCounts, SYMBOLS};
use crate::tree::{HuffmanTree, Node, NodeId};

/// Maximum code length in bits.
pub const MAX_CODE_LEN: usize = SYMBOLS;

const WORDS: usize = MAX_CODE_LEN / 64;

/// Bit sequence for one byte value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Code {
    words: [u64; WORDS],
    len: usize,
}

impl Code {
    /// Empty code.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a code from a slice of branch bits.
    pub fn from_bits(bits: &[u8]) -> Self {
        let mut code = Self::new();
        for &bit in bits {
            code.push(bit);
        }
        code
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a branch bit.
    ///
    /// # Panics
    /// Panics if the code is already [`MAX_CODE_LEN`] bits long.
    pub fn push(&mut self, bit: u8) {
        assert!(self.len < MAX_CODE_LEN, "code exceeds {MAX_CODE_LEN} bits");
        let word = self.len / 64;
        let offset = self.len % 64;
        self.words[word] &= !(1u64 << offset);
        self.words[word] |= u64::from(bit & 1) << offset;
        self.len += 1;
    }

    /// Drop the last bit.
    pub fn pop(&mut self) {
        if self.len > 0 {
            self.len -= 1;
            self.words[self.len / 64] &= !(1u64 << (self.len % 64));
        }
    }

    /// Get the bit at depth `index`.
    #[inline]
    pub fn get_bit(&self, index: usize) -> u8 {
        debug_assert!(index < self.len);
        ((self.words[index / 64] >> (index % 64)) & 1) as u8
    }

    /// Iterate over the code in right-justified chunks of at most 32 bits,
    /// first bit in the LSB.
    pub fn chunks(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        (0..self.len).step_by(32).map(move |start| {
            let n = (self.len - start).min(32);
            let word = self.words[start / 64] >> (start % 64);
            let mask = (1u64 << n) - 1;
            ((word & mask) as u32, n)
        })
    }
}

/// Code for every byte value, indexed by byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Code; SYMBOLS],
}

impl CodeTable {
    /// Derive the table from a tree.
    pub fn build(tree: &HuffmanTree) -> Self {
        CodeBuilder::new().build(tree)
    }

    #[inline]
    pub fn get(&self, byte: u8) -> &Code {
        &self.codes[byte as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        (0..=u8::MAX).zip(self.codes.iter())
    }

    /// Unused bits in the last byte once `counts` has been encoded.
    ///
    /// Computed from code lengths alone, modulo 8, so it never overflows.
    pub fn padding_bits(&self, counts: &ByteCounts) -> u8 {
        let used = self.iter().fold(0u64, |acc, (byte, code)| {
            (acc + (counts.get(byte) % 8) * (code.len() as u64 % 8)) % 8
        });
        ((8 - used) % 8) as u8
    }

    /// Total payload bits for `counts`.
    pub fn encoded_bits(&self, counts: &ByteCounts) -> u64 {
        self.iter()
            .map(|(byte, code)| counts.get(byte) * code.len() as u64)
            .sum()
    }
}

/// Depth-first code derivation with a call-local path buffer.
#[derive(Debug, Default)]
pub struct CodeBuilder {
    path: Code,
    stack: Vec<Step>,
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Enter(NodeId, Option<u8>),
    Leave,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self {
            path: Code::new(),
            stack: Vec::with_capacity(2 * MAX_CODE_LEN),
        }
    }

    /// Walk `tree`, child 0 before child 1, recording the path to each leaf.
    pub fn build(mut self, tree: &HuffmanTree) -> CodeTable {
        let mut codes = [Code::new(); SYMBOLS];
        self.stack.push(Step::Enter(tree.root(), None));

        while let Some(step) = self.stack.pop() {
            match step {
                Step::Enter(id, bit) => {
                    if let Some(bit) = bit {
                        self.path.push(bit);
                    }
                    match tree.node(id) {
                        Node::Leaf(byte) => codes[byte as usize] = self.path,
                        Node::Internal { children, .. } => {
                            // popped in reverse: child 0 is visited first
                            self.stack.push(Step::Leave);
                            self.stack.push(Step::Enter(children[1], Some(1)));
                            self.stack.push(Step::Leave);
                            self.stack.push(Step::Enter(children[0], Some(0)));
                        }
                    }
                }
                Step::Leave => self.path.pop(),
            }
        }

        CodeTable { codes }
    }
}
