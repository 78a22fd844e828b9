//! huffarc Command Line Interface
//!
//! Usage:
//!   huffarc -c -f input -o input.huf      # compress
//!   huffarc -u -f input.huf -o input      # decompress
//!   huffarc --version
//!   huffarc --help
//!
//! On success three lines are printed: input bytes, output bytes and header
//! bytes, as reported by the library.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgGroup, Parser};
use huffarc::{compress_seekable, decompress, HuffmanStats};

/// Byte-oriented Huffman archiver.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["compress", "decompress"])))]
struct Args {
    /// Compress the input file
    #[arg(short = 'c')]
    compress: bool,

    /// Decompress the input file
    #[arg(short = 'u')]
    decompress: bool,

    /// Input file
    #[arg(short = 'f', long = "file", value_name = "INPUT")]
    input: PathBuf,

    /// Output file (default: <input>.huf, or <input> without .huf when decompressing)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Log progress to stderr (overridden by RUST_LOG)
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Default output path when `-o` is omitted.
fn default_output(input: &Path, compress: bool) -> PathBuf {
    let name = input.as_os_str().to_string_lossy();
    if compress {
        PathBuf::from(format!("{name}.huf"))
    } else if let Some(stripped) = name.strip_suffix(".huf") {
        PathBuf::from(stripped)
    } else {
        PathBuf::from(format!("{name}.out"))
    }
}

/// Run one mode against opened files, discarding the output on failure.
fn run(args: &Args, output_path: &Path) -> Result<HuffmanStats, String> {
    let input = File::open(&args.input)
        .map_err(|e| format!("Cannot open input file {}: {e}", args.input.display()))?;
    let output = File::create(output_path)
        .map_err(|e| format!("Cannot create output file {}: {e}", output_path.display()))?;

    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);

    let result = if args.compress {
        compress_seekable(&mut reader, &mut writer)
            .map_err(|e| format!("Compression failed: {e}"))
    } else {
        decompress(&mut reader, &mut writer).map_err(|e| format!("Decompression failed: {e}"))
    };

    drop(writer);
    if result.is_err() {
        if let Err(e) = fs::remove_file(output_path) {
            log::warn!("could not remove partial output {}: {e}", output_path.display());
        }
    }

    result
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input, args.compress));

    log::debug!(
        "{} {} -> {}",
        if args.compress { "compressing" } else { "decompressing" },
        args.input.display(),
        output_path.display()
    );

    match run(&args, &output_path) {
        Ok(stats) => println!("{stats}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
