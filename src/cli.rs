use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(name = "firemon", version)]
#[command(about = "A fast concurrent tool to check Firebase vulnerabilities")]
#[command(long_about = "Checks Firebase Realtime Database URLs for unauthenticated read access and takeover vulnerabilities")]
pub struct Cli {
    /// Firebase URLs, or files containing one URL per line
    #[arg(value_name = "URL_OR_FILE")]
    pub inputs: Vec<String>,

    /// Number of concurrent requests
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_concurrency)]
    pub concurrency: usize,

    /// Output file to save results
    #[arg(short = 'o', long = "output-file", visible_alias = "outputFile", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn parse_concurrency(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("concurrency must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid concurrency '{}': {}", value, e)),
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
