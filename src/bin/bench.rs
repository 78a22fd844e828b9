//! Throughput benchmarks for huffarc.
//!
//! Measures compression and decompression speed over built-in synthetic
//! corpora plus any files named on the command line.
//!
//! Usage:
//!   cargo run --release --bin bench                          # default 20 iterations
//!   cargo run --release --bin bench -- -n 100 some/file.bin  # custom run

#![allow(clippy::cast_precision_loss)]

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use huffarc::{compress_bytes, decompress_bytes};

const CORPUS_LEN: usize = 1 << 20;

const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog. \
    Huffman coding assigns short codes to frequent bytes and long codes to rare ones. ";

#[derive(Parser, Debug)]
#[command(about = "huffarc throughput benchmarks")]
struct Args {
    /// Timed iterations per corpus
    #[arg(short = 'n', long, default_value_t = 20)]
    iterations: usize,

    /// Extra files to benchmark
    files: Vec<PathBuf>,
}

struct Corpus {
    name: String,
    data: Vec<u8>,
}

fn builtin_corpora() -> Vec<Corpus> {
    let text: Vec<u8> = SAMPLE_TEXT.bytes().cycle().take(CORPUS_LEN).collect();
    let ramp: Vec<u8> = (0..CORPUS_LEN).map(|i| (i * 31 % 251) as u8).collect();

    vec![
        Corpus {
            name: "zeros".to_string(),
            data: vec![0u8; CORPUS_LEN],
        },
        Corpus {
            name: "text".to_string(),
            data: text,
        },
        Corpus {
            name: "ramp".to_string(),
            data: ramp,
        },
    ]
}

fn mb_per_sec(bytes: usize, per_iter_us: f64) -> f64 {
    bytes as f64 / per_iter_us
}

fn bench_compress(corpus: &Corpus, iterations: usize) {
    // Warmup run
    let Ok(packed) = compress_bytes(&corpus.data) else {
        println!("{:<20} SKIP (compression failed)", corpus.name);
        return;
    };

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = compress_bytes(&corpus.data);
    }
    let per_iter_us = start.elapsed().as_secs_f64() * 1_000_000.0 / iterations as f64;

    let ratio = corpus.data.len() as f64 / packed.len() as f64;
    println!(
        "{:<20} {:>10.1} µs/iter  {:>8.1} MB/s  ratio {:>5.2}x",
        corpus.name,
        per_iter_us,
        mb_per_sec(corpus.data.len(), per_iter_us),
        ratio
    );
}

fn bench_decompress(corpus: &Corpus, iterations: usize) {
    let packed = match compress_bytes(&corpus.data) {
        Ok(data) => data,
        Err(e) => {
            println!("{:<20} SKIP (compression failed: {e})", corpus.name);
            return;
        }
    };

    // Warmup run
    let _ = decompress_bytes(&packed);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = decompress_bytes(&packed);
    }
    let per_iter_us = start.elapsed().as_secs_f64() * 1_000_000.0 / iterations as f64;

    println!(
        "{:<20} {:>10.1} µs/iter  {:>8.1} MB/s",
        corpus.name,
        per_iter_us,
        mb_per_sec(corpus.data.len(), per_iter_us)
    );
}

fn main() {
    let args = Args::parse();
    let iterations = args.iterations.max(1);

    let mut corpora = builtin_corpora();
    for path in &args.files {
        match fs::read(path) {
            Ok(data) => corpora.push(Corpus {
                name: path.display().to_string(),
                data,
            }),
            Err(e) => println!("{:<20} SKIP ({e})", path.display()),
        }
    }

    println!("huffarc Benchmarks");
    println!("==================");
    println!("Iterations: {iterations}");

    println!("\nCompression:");
    for corpus in &corpora {
        bench_compress(corpus, iterations);
    }

    println!("\nDecompression:");
    for corpus in &corpora {
        bench_decompress(corpus, iterations);
    }
}
