//! Huffman decompression.
//!
//! The header is read first and the tree rebuilt from its frequency table.
//! The payload is then streamed in chunks, always holding back the most
//! recent byte so the final byte (and its padding) is known without
//! buffering the whole payload.

use std::io::{Read, Write};

use crate::bitreader::BitReader;
use crate::error::{HuffmanError, Result};
use crate::frequency::{read_chunk, ByteFrequency, CHUNK_SIZE};
use crate::header::Header;
use crate::stats::HuffmanStats;
use crate::tree::{HuffmanTree, Node, NodeId};

/// Bit-by-bit tree walker.
#[derive(Debug)]
pub struct Decoder {
    tree: HuffmanTree,
    cursor: NodeId,
    decoded: Vec<u8>,
}

impl Decoder {
    pub fn new(frequency: &ByteFrequency) -> Self {
        let tree = HuffmanTree::build(frequency);
        let cursor = tree.root();
        Self {
            tree,
            cursor,
            decoded: Vec::with_capacity(CHUNK_SIZE),
        }
    }

    /// Consume every bit of `bits`, collecting a byte whenever a leaf is
    /// reached.
    pub fn feed(&mut self, bits: BitReader<'_>) -> Result<()> {
        for bit in bits {
            let Some(next) = self.tree.child(self.cursor, bit) else {
                return Err(HuffmanError::CorruptPayload(
                    "descent past a leaf".to_string(),
                ));
            };

            if let Node::Leaf(byte) = self.tree.node(next) {
                self.decoded.push(byte);
                self.cursor = self.tree.root();
            } else {
                self.cursor = next;
            }
        }
        Ok(())
    }

    /// Bytes decoded and not yet taken.
    pub fn decoded(&self) -> &[u8] {
        &self.decoded
    }

    /// Write decoded bytes to `writer`; returns how many were written.
    pub fn drain_to<W: Write>(&mut self, writer: &mut W) -> Result<usize> {
        let n = self.decoded.len();
        if n > 0 {
            writer.write_all(&self.decoded)?;
            self.decoded.clear();
        }
        Ok(n)
    }

    /// Check that the last consumed bit completed a symbol.
    pub fn finish(&self) -> Result<()> {
        if self.cursor == self.tree.root() {
            Ok(())
        } else {
            Err(HuffmanError::CorruptPayload(
                "trailing bits do not complete a symbol".to_string(),
            ))
        }
    }
}

/// Decompress a header-prefixed stream from `input` into `output`.
///
/// On error the bytes already written to `output` must be discarded.
pub fn decompress<R, W>(input: &mut R, output: &mut W) -> Result<HuffmanStats>
where
    R: Read,
    W: Write,
{
    let header = Header::read_from(input)?;
    let mut decoder = Decoder::new(&header.frequency);

    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut held: Option<u8> = None;
    let mut payload = 0u64;
    let mut written = 0u64;

    loop {
        let n = read_chunk(input, &mut chunk)?;
        if n == 0 {
            break;
        }
        payload += n as u64;

        if let Some(byte) = held {
            decoder.feed(BitReader::new(&[byte], 8))?;
        }
        let body = &chunk[..n - 1];
        decoder.feed(BitReader::new(body, body.len() * 8))?;
        held = Some(chunk[n - 1]);

        written += decoder.drain_to(output)? as u64;
    }

    let tail: Vec<u8> = held.into_iter().collect();
    decoder.feed(BitReader::with_padding(&tail, header.padding_bits)?)?;
    decoder.finish()?;
    written += decoder.drain_to(output)? as u64;
    output.flush()?;

    log::debug!(
        "decompressed {payload} payload bytes into {written} bytes, padding {}",
        header.padding_bits
    );

    Ok(HuffmanStats::new(payload, written))
}

/// Decompress an in-memory buffer.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut input = data;
    let mut output = Vec::new();
    decompress(&mut input, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::ByteCounts;
    use crate::header::HEADER_LEN;

    fn container(frequency: ByteFrequency, padding: u8, payload: &[u8]) -> Vec<u8> {
        let mut data = Header::new(frequency, padding).to_bytes().to_vec();
        data.extend_from_slice(payload);
        data
    }

    #[test]
    fn test_known_payload() {
        // 0 -> "0", 1 -> "10"
        let freq = ByteCounts::of(&[0, 0, 1]).frequency();
        let data = container(freq, 4, &[0x04]);
        assert_eq!(decompress_bytes(&data).unwrap(), vec![0, 0, 1]);
    }

    #[test]
    fn test_symbol_ending_on_last_bit() {
        let freq = ByteCounts::of(&[0, 0, 1]).frequency();
        // bits 1,0 1,0 1,0 1,0 -> 0b0101_0101, last code ends on bit 7
        let data = container(freq, 0, &[0x55]);
        assert_eq!(decompress_bytes(&data).unwrap(), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_empty_payload() {
        let data = container(ByteFrequency::default(), 0, &[]);
        let mut output = Vec::new();
        let stats = decompress(&mut data.as_slice(), &mut output).unwrap();
        assert!(output.is_empty());
        assert_eq!(stats.input_bytes, 0);
        assert_eq!(stats.output_bytes, 0);
        assert_eq!(stats.header_bytes, HEADER_LEN as u64);
    }

    #[test]
    fn test_padding_without_payload() {
        let data = container(ByteFrequency::default(), 3, &[]);
        assert!(matches!(
            decompress_bytes(&data),
            Err(HuffmanError::CorruptPayload(_))
        ));
    }

    #[test]
    fn test_dangling_bits() {
        // a lone "1" never reaches a leaf
        let freq = ByteCounts::of(&[0, 0, 1]).frequency();
        let data = container(freq, 7, &[0x01]);
        assert!(matches!(
            decompress_bytes(&data),
            Err(HuffmanError::CorruptPayload(_))
        ));
    }

    #[test]
    fn test_truncated_header() {
        let data = vec![0u8; HEADER_LEN - 1];
        assert!(matches!(
            decompress_bytes(&data),
            Err(HuffmanError::CorruptHeader { .. })
        ));
    }

    #[test]
    fn test_decoder_across_feeds() {
        let freq = ByteCounts::of(&[0, 0, 1]).frequency();
        let mut decoder = Decoder::new(&freq);

        // "1" in one feed, "0" in the next completes byte 1
        decoder.feed(BitReader::new(&[0x01], 1)).unwrap();
        assert!(decoder.decoded().is_empty());
        assert!(decoder.finish().is_err());

        decoder.feed(BitReader::new(&[0x00], 1)).unwrap();
        assert_eq!(decoder.decoded(), &[1]);
        assert!(decoder.finish().is_ok());
    }
}
