//! IronPack CLI - pure Rust gzip compression and decompression.

use clap::{Parser, Subcommand, ValueEnum};
use ironpack_gzip::{GzipHeader, read_member, write_member};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ironpack")]
#[command(author, version, about = "Pure Rust gzip compressor/decompressor")]
#[command(long_about = "
IronPack is a pure Rust implementation of the DEFLATE compressed data
format (RFC 1951) and the gzip file format (RFC 1952).

Examples:
  ironpack compress data.txt
  ironpack compress -l best data.txt -o data.txt.gz
  ironpack decompress data.txt.gz
  ironpack info data.txt.gz
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a gzip member
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (defaults to <input>.gz)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compression level
        #[arg(short = 'l', long, value_enum, default_value = "normal")]
        level: CompressionLevel,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decompress a gzip file
    #[command(alias = "x")]
    Decompress {
        /// File to decompress
        input: PathBuf,

        /// Output file (defaults to the stored filename, or the input
        /// without its .gz suffix)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show gzip member information
    #[command(alias = "i")]
    Info {
        /// File to inspect
        input: PathBuf,
    },
}

/// Compression level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum CompressionLevel {
    /// Store without compression
    Store,
    /// Fast compression
    Fast,
    /// Normal compression (default)
    #[default]
    Normal,
    /// Best compression
    Best,
}

impl CompressionLevel {
    fn as_deflate_level(self) -> u8 {
        match self {
            Self::Store => 0,
            Self::Fast => 1,
            Self::Normal => 6,
            Self::Best => 9,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            level,
            verbose,
        } => cmd_compress(&input, output.as_deref(), level, verbose),
        Commands::Decompress {
            input,
            output,
            verbose,
        } => cmd_decompress(&input, output.as_deref(), verbose),
        Commands::Info { input } => cmd_info(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    level: CompressionLevel,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(input)?;

    let mut header = GzipHeader::named(
        input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("data"),
    );
    header.touch();

    let mut compressed = Vec::new();
    write_member(&header, &data, level.as_deflate_level(), &mut compressed)?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension(gz_extension(input)));
    std::fs::write(&output, &compressed)?;

    if verbose {
        let ratio = if data.is_empty() {
            0.0
        } else {
            (1.0 - compressed.len() as f64 / data.len() as f64) * 100.0
        };
        println!(
            "{} -> {} ({} -> {} bytes, {:.1}% saved)",
            input.display(),
            output.display(),
            data.len(),
            compressed.len(),
            ratio
        );
    }

    Ok(())
}

fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(input)?;
    let member = read_member(&mut BufReader::new(file))?;

    let output = output.map(Path::to_path_buf).unwrap_or_else(|| {
        // Prefer the filename stored in the member header.
        match &member.header.filename {
            Some(name) => input.with_file_name(name),
            None => input.with_extension(""),
        }
    });
    std::fs::write(&output, &member.data)?;

    if verbose {
        println!(
            "{} -> {} ({} bytes)",
            input.display(),
            output.display(),
            member.data.len()
        );
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = std::fs::metadata(input)?;
    let file = File::open(input)?;
    let member = read_member(&mut BufReader::new(file))?;

    println!("File: {}", input.display());
    println!("Compressed size: {} bytes", metadata.len());
    println!("Method: deflate");
    println!("OS: {}", os_name(member.header.os));
    if let Some(name) = &member.header.filename {
        println!("Original filename: {}", name);
    }
    if let Some(comment) = &member.header.comment {
        println!("Comment: {}", comment);
    }
    if member.header.mtime > 0 {
        println!("Modification time: {} (Unix timestamp)", member.header.mtime);
    }

    println!("Uncompressed size: {} bytes", member.data.len());
    if !member.data.is_empty() {
        println!(
            "Compression ratio: {:.1}%",
            (1.0 - metadata.len() as f64 / member.data.len() as f64) * 100.0
        );
    }

    Ok(())
}

/// Appends `.gz` to the existing extension instead of replacing it.
fn gz_extension(input: &Path) -> String {
    match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.gz", ext),
        None => "gz".to_string(),
    }
}

fn os_name(os: u8) -> String {
    match os {
        0 => "FAT filesystem".to_string(),
        3 => "Unix".to_string(),
        7 => "Macintosh".to_string(),
        11 => "NTFS filesystem".to_string(),
        255 => "unknown".to_string(),
        other => format!("other ({})", other),
    }
}
