//! Huffman compression.
//!
//! Output layout: [`Header`] followed by the packed payload. Two passes over
//! the input are needed, one to count bytes and one to emit codes. Seekable
//! sources are rewound between passes; anything else is buffered in memory.

use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};

use crate::bitbuffer::BitBuffer;
use crate::code::CodeTable;
use crate::error::Result;
use crate::frequency::{read_chunk, ByteCounts, CHUNK_SIZE};
use crate::header::Header;
use crate::stats::HuffmanStats;
use crate::tree::HuffmanTree;

/// Code emission state for one compression call.
struct Encoder {
    codes: CodeTable,
    bits: BitBuffer,
    written: u64,
}

impl Encoder {
    /// Build the tree and codes for `counts` and the matching header.
    fn prepare(counts: &ByteCounts) -> (Self, Header) {
        let frequency = counts.frequency();
        let tree = HuffmanTree::build(&frequency);
        let codes = CodeTable::build(&tree);
        let padding_bits = codes.padding_bits(counts);

        log::debug!(
            "compressing {} bytes ({} distinct), {} payload bits, padding {}",
            counts.total(),
            counts.distinct(),
            codes.encoded_bits(counts),
            padding_bits
        );

        let encoder = Self {
            codes,
            bits: BitBuffer::new(),
            written: 0,
        };
        (encoder, Header::new(frequency, padding_bits))
    }

    fn push<W: Write>(&mut self, data: &[u8], output: &mut W) -> Result<()> {
        for &byte in data {
            self.bits.append_code(self.codes.get(byte));
        }
        if self.bits.pending_bytes() >= CHUNK_SIZE {
            self.written += self.bits.drain_to(output)? as u64;
        }
        Ok(())
    }

    /// Flush everything, including the final partial byte.
    fn finish<W: Write>(self, output: &mut W) -> Result<u64> {
        Ok(self.written + self.bits.finish(output)? as u64)
    }
}

/// Compress everything `input` yields into `output`.
///
/// The input is buffered in memory; use [`compress_seekable`] to stream a
/// seekable source in two passes instead. Neither stream is closed.
pub fn compress<R, W>(input: &mut R, output: &mut W) -> Result<HuffmanStats>
where
    R: Read,
    W: Write,
{
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;

    let counts = ByteCounts::of(&data);
    let (mut encoder, header) = Encoder::prepare(&counts);

    header.write_to(output)?;
    for chunk in data.chunks(CHUNK_SIZE) {
        encoder.push(chunk, output)?;
    }
    let payload = encoder.finish(output)?;
    output.flush()?;

    Ok(HuffmanStats::new(counts.total(), payload))
}

/// Compress a seekable source from its current position to the end.
///
/// The source is read once to count bytes, rewound to where it started and
/// read again to emit codes.
pub fn compress_seekable<R, W>(input: &mut R, output: &mut W) -> Result<HuffmanStats>
where
    R: Read + Seek,
    W: Write,
{
    let start = input.stream_position()?;
    let counts = ByteCounts::measure(input)?;
    input.seek(SeekFrom::Start(start))?;

    let (mut encoder, header) = Encoder::prepare(&counts);
    header.write_to(output)?;

    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut seen = 0u64;
    loop {
        let n = read_chunk(input, &mut chunk)?;
        if n == 0 {
            break;
        }
        seen += n as u64;
        encoder.push(&chunk[..n], output)?;
    }

    if seen != counts.total() {
        return Err(io::Error::new(
            ErrorKind::InvalidData,
            format!(
                "input changed between passes: counted {} bytes, encoded {seen}",
                counts.total()
            ),
        )
        .into());
    }

    let payload = encoder.finish(output)?;
    output.flush()?;

    Ok(HuffmanStats::new(counts.total(), payload))
}

/// Compress an in-memory buffer.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut input = data;
    let mut output = Vec::new();
    compress(&mut input, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HEADER_LEN;
    use std::io::Cursor;

    #[test]
    fn test_empty_input() {
        let out = compress_bytes(&[]).unwrap();
        assert_eq!(out.len(), HEADER_LEN);
        assert_eq!(out[HEADER_LEN - 1], 0);
        assert!(out[..HEADER_LEN - 1].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_single_byte_payload() {
        // one distinct byte: 1-bit code, so 3 bits -> one byte, 5 padding bits
        let out = compress_bytes(b"aaa").unwrap();
        assert_eq!(out.len(), HEADER_LEN + 1);
        assert_eq!(out[HEADER_LEN - 1], 5);
    }

    #[test]
    fn test_known_payload() {
        // 0 -> "0", 1 -> "10": bits 0,0,1,0 -> 0b0100 with 4 padding bits
        let out = compress_bytes(&[0, 0, 1]).unwrap();
        assert_eq!(&out[0..4], &(2.0f32 / 3.0).to_le_bytes());
        assert_eq!(&out[4..8], &(1.0f32 / 3.0).to_le_bytes());
        assert_eq!(out[HEADER_LEN - 1], 4);
        assert_eq!(&out[HEADER_LEN..], &[0x04]);
    }

    #[test]
    fn test_stats() {
        let mut input = Cursor::new(b"hello huffman".to_vec());
        let mut output = Vec::new();
        let stats = compress(&mut input, &mut output).unwrap();

        assert_eq!(stats.input_bytes, 13);
        assert_eq!(stats.header_bytes, HEADER_LEN as u64);
        assert_eq!(stats.output_bytes as usize, output.len() - HEADER_LEN);
    }

    #[test]
    fn test_seekable_matches_buffered() {
        let data: Vec<u8> = (0..300_000u64).map(|i| (i * i % 97) as u8).collect();

        let buffered = compress_bytes(&data).unwrap();

        let mut output = Vec::new();
        let stats = compress_seekable(&mut Cursor::new(&data), &mut output).unwrap();

        assert_eq!(output, buffered);
        assert_eq!(stats.input_bytes, data.len() as u64);
    }

    /// Records the size of every write.
    #[derive(Default)]
    struct WriteLog {
        data: Vec<u8>,
        writes: Vec<usize>,
    }

    impl Write for WriteLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.data.extend_from_slice(buf);
            self.writes.push(buf.len());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_buffered_output_is_streamed() {
        let data: Vec<u8> = (0..1_000_000u64).map(|i| (i * 7 % 256) as u8).collect();
        let mut sink = WriteLog::default();
        compress(&mut data.as_slice(), &mut sink).unwrap();

        // header, then payload in chunk-sized pieces rather than one block
        assert_eq!(sink.writes[0], HEADER_LEN);
        assert!(sink.writes.len() > 3, "writes: {:?}", sink.writes);
        assert!(sink.writes[1..].iter().all(|&n| n < 2 * CHUNK_SIZE));
        assert_eq!(sink.data, compress_bytes(&data).unwrap());
    }

    #[test]
    fn test_seekable_starts_at_position() {
        let data = b"skip-me:payload".to_vec();
        let mut input = Cursor::new(&data);
        input.set_position(8);

        let mut output = Vec::new();
        let stats = compress_seekable(&mut input, &mut output).unwrap();

        assert_eq!(stats.input_bytes, 7);
        assert_eq!(output, compress_bytes(b"payload").unwrap());
    }
}
