use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;

pub const DEFAULT_CONCURRENCY: usize = 20;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

/// Settings for one scan run. Built once at startup and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub concurrency: usize,
    pub verbose: bool,
    pub output_mode: OutputMode,
    pub output_file: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            verbose: false,
            output_mode: OutputMode::Text,
            output_file: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ScanConfig {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }

    pub fn with_output_file(mut self, output_file: impl Into<PathBuf>) -> Self {
        self.output_file = Some(output_file.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&Cli> for ScanConfig {
    fn from(cli: &Cli) -> Self {
        let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Text };
        let config = Self::default()
            .with_concurrency(cli.concurrency)
            .with_verbose(cli.verbose)
            .with_output_mode(output_mode)
            .with_timeout(Duration::from_secs(cli.timeout));

        match &cli.output_file {
            Some(path) => config.with_output_file(path),
            None => config,
        }
    }
}
