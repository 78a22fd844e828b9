//! # huffarc
//!
//! Byte-oriented Huffman compression with a deterministic, self-describing
//! container.
//!
//! ## Design
//!
//! - **Deterministic** - the tree is a pure function of the frequency table
//!   and a total `(weight, byte)` tie-break, so output is byte-identical
//!   across runs
//! - **Safe Rust** - `#![forbid(unsafe_code)]`
//! - **Stream based** - works on any `Read`/`Write` pair and never closes
//!   either side
//!
//! ## Container Format
//!
//! | Offset | Size      | Field                                         |
//! |--------|-----------|-----------------------------------------------|
//! | 0      | 256 x 4   | frequency of bytes 0..=255, little-endian f32 |
//! | 1024   | 1         | unused high bits in the last payload byte     |
//! | 1025   | variable  | packed codes, low bit first within each byte  |
//!
//! ## API Overview
//!
//! ### High-Level Functions
//!
//! - [`compress()`] / [`compress_seekable()`] - compress a stream
//! - [`decompress()`] - restore a stream
//! - [`compress_bytes()`] / [`decompress_bytes()`] - in-memory variants
//!
//! ### Low-Level Components
//!
//! - [`ByteCounts`] / [`ByteFrequency`] - byte statistics
//! - [`HuffmanTree`] - arena-backed code tree
//! - [`CodeTable`] - prefix code per byte value
//! - [`Header`] - 1025-byte container header
//! - [`BitBuffer`] / [`BitReader`] - LSB-first bit packing
//!
//! ## Usage
//!
//! ```rust
//! use huffarc::{compress_bytes, decompress_bytes};
//!
//! let data = b"abracadabra".to_vec();
//! let packed = compress_bytes(&data)?;
//! assert_eq!(decompress_bytes(&packed)?, data);
//! # Ok::<(), huffarc::HuffmanError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod bitbuffer;
mod bitreader;
mod code;
mod compress;
mod decompress;
mod error;
mod frequency;
mod header;
mod stats;
mod tree;

pub use bitbuffer::BitBuffer;
pub use bitreader::BitReader;
pub use code::{Code, CodeBuilder, CodeTable, MAX_CODE_LEN};
pub use compress::{compress, compress_bytes, compress_seekable};
pub use decompress::{decompress, decompress_bytes, Decoder};
pub use error::{HuffmanError, Result};
pub use frequency::{ByteCounts, ByteFrequency, SYMBOLS};
pub use header::{Header, FREQUENCY_TABLE_LEN, HEADER_LEN};
pub use stats::HuffmanStats;
pub use tree::{HuffmanTree, Node, NodeId};
