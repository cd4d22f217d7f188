use std::path::PathBuf;

use clap::Parser;

use crate::config::OutputFormat;
use crate::logging::LogArgs;

#[derive(Debug, Parser)]
#[command(
    name = "fortuna-gen",
    about = "Fortuna counter-mode generator: expands seed material into pseudorandom bytes"
)]
pub struct Cli {
    /// Number of bytes to generate (default: 32)
    #[arg(short = 'n', long = "bytes")]
    pub bytes: Option<usize>,

    /// Output format (default: hex)
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Write output to a file instead of stdout
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Reseed with hex-encoded bytes; repeatable, applied in order
    #[arg(short = 's', long = "seed", value_name = "HEX")]
    pub seeds: Vec<String>,

    /// Reseed with the raw contents of a file; repeatable, applied before --seed
    #[arg(long = "seed-file", value_name = "PATH")]
    pub seed_files: Vec<PathBuf>,

    /// Configuration file path (default: /etc/fortuna-gen.toml)
    #[arg(long = "config")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogArgs,
}
