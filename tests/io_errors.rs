//! Behaviour on misbehaving streams: writers that run out of space, readers
//! that fail midway, and readers that report `Interrupted`.

use std::io::{self, Cursor, ErrorKind, Read, Seek, SeekFrom, Write};

use huffarc::{
    compress, compress_bytes, compress_seekable, decompress, HuffmanError, HEADER_LEN,
};

/// Accepts `budget` bytes, then fails every write.
struct FullWriter {
    budget: usize,
    written: Vec<u8>,
}

impl FullWriter {
    fn new(budget: usize) -> Self {
        Self {
            budget,
            written: Vec::new(),
        }
    }
}

impl Write for FullWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(ErrorKind::Other, "device full"));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Yields `data[..fail_at]`, then fails every read.
struct BrokenReader {
    data: Vec<u8>,
    pos: usize,
    fail_at: usize,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.fail_at {
            return Err(io::Error::new(ErrorKind::ConnectionReset, "reset"));
        }
        let end = self.fail_at.min(self.pos + buf.len());
        let n = end - self.pos;
        buf[..n].copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(n)
    }
}

/// Reports `Interrupted` before every successful read.
struct Interrupting<R> {
    inner: R,
    interrupt_next: bool,
    interrupts: usize,
}

impl<R> Interrupting<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            interrupt_next: true,
            interrupts: 0,
        }
    }
}

impl<R: Read> Read for Interrupting<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_next {
            self.interrupt_next = false;
            self.interrupts += 1;
            return Err(io::Error::new(ErrorKind::Interrupted, "signal"));
        }
        self.interrupt_next = true;
        self.inner.read(buf)
    }
}

impl<R: Seek> Seek for Interrupting<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

fn sample() -> Vec<u8> {
    b"interrupted streams must still round trip ".repeat(50)
}

#[test]
fn test_compress_to_full_writer() {
    let mut sink = FullWriter::new(10);
    let result = compress(&mut &b"hello"[..], &mut sink);

    assert!(matches!(result, Err(HuffmanError::Io(_))), "got {result:?}");
    assert_eq!(sink.written.len(), 10);
}

#[test]
fn test_compress_seekable_to_full_writer() {
    let data = sample();

    // header fits, payload does not
    let mut sink = FullWriter::new(HEADER_LEN + 3);
    let result = compress_seekable(&mut Cursor::new(&data), &mut sink);

    assert!(matches!(result, Err(HuffmanError::Io(_))), "got {result:?}");
}

#[test]
fn test_decompress_to_full_writer() {
    let packed = compress_bytes(b"hello").unwrap();
    let mut sink = FullWriter::new(0);
    let result = decompress(&mut packed.as_slice(), &mut sink);

    assert!(matches!(result, Err(HuffmanError::Io(_))), "got {result:?}");
}

#[test]
fn test_compress_from_broken_reader() {
    let mut source = BrokenReader {
        data: sample(),
        pos: 0,
        fail_at: 17,
    };
    let mut output = Vec::new();
    let result = compress(&mut source, &mut output);

    match result {
        Err(HuffmanError::Io(e)) => assert_eq!(e.kind(), ErrorKind::ConnectionReset),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_decompress_from_broken_reader() {
    let packed = compress_bytes(&sample()).unwrap();

    // fail inside the header, then inside the payload
    for fail_at in [100, HEADER_LEN + 5] {
        let mut source = BrokenReader {
            data: packed.clone(),
            pos: 0,
            fail_at,
        };
        let mut output = Vec::new();
        let result = decompress(&mut source, &mut output);

        assert!(
            matches!(result, Err(HuffmanError::Io(_))),
            "fail_at {fail_at}: got {result:?}"
        );
    }
}

#[test]
fn test_interrupted_reads_are_retried() {
    let data = sample();
    let expected = compress_bytes(&data).unwrap();

    let mut source = Interrupting::new(Cursor::new(&data));
    let mut packed = Vec::new();
    compress_seekable(&mut source, &mut packed).unwrap();
    assert_eq!(packed, expected, "seekable compression");
    assert!(source.interrupts >= 2, "both passes should be interrupted");

    let mut source = Interrupting::new(data.as_slice());
    let mut buffered = Vec::new();
    compress(&mut source, &mut buffered).unwrap();
    assert_eq!(buffered, expected, "buffered compression");

    let mut source = Interrupting::new(packed.as_slice());
    let mut restored = Vec::new();
    let stats = decompress(&mut source, &mut restored).unwrap();
    assert_eq!(restored, data, "decompression");
    assert_eq!(stats.input_bytes as usize, packed.len() - HEADER_LEN);
    assert!(source.interrupts >= 2, "header and payload reads should be interrupted");
}
