use eyre::{Result, WrapErr};
use log::LevelFilter;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Level for this crate's own diagnostics.
pub fn crate_level(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::Debug } else { LevelFilter::Warn }
}

/// Initialize logging to stderr, or to `log_file` when given.
///
/// Dependencies stay at WARN so HTTP internals don't drown out the scan.
/// `RUST_LOG` is applied last and wins over both.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = crate_level(verbose);

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_CRATE_NAME"), level);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create log directory {}", parent.display()))?;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .wrap_err_with(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().wrap_err("Failed to initialize logging")?;

    log::debug!("[logging] initialized: level={} file={}", level,
        log_file.map(|p| p.display().to_string()).unwrap_or_else(|| "stderr".to_string()));

    Ok(())
}
