use eyre::{Result, WrapErr};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::target::{ScanTarget, dedupe, normalize};

/// Expand command-line inputs into raw URL strings.
///
/// An argument naming an existing regular file is read line by line;
/// anything else is taken as a literal URL. Unreadable files are skipped.
pub fn collect_raw_inputs(args: &[String]) -> Vec<String> {
    let mut urls = Vec::new();

    for arg in args {
        let path = Path::new(arg);
        if !is_file(path) {
            urls.push(arg.clone());
            continue;
        }

        match read_urls_from_file(path) {
            Ok(lines) => {
                log::debug!("[input] file_loaded: path={} urls={}", path.display(), lines.len());
                urls.extend(lines);
            }
            Err(e) => log::info!("Warning: Could not read file {}: {:#}", path.display(), e),
        }
    }

    urls
}

/// Read one URL per line, skipping blank lines and `#` comments.
pub fn read_urls_from_file(path: &Path) -> Result<Vec<String>> {
    let file = fs::File::open(path)
        .wrap_err_with(|| format!("Failed to open {}", path.display()))?;

    let mut urls = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let line = line.trim();
        if !line.is_empty() && !line.starts_with('#') {
            urls.push(line.to_string());
        }
    }

    Ok(urls)
}

/// Inputs to unique scan targets, in first-seen order.
pub fn resolve_targets(args: &[String]) -> Vec<ScanTarget> {
    let raw = collect_raw_inputs(args);
    let accepted: Vec<ScanTarget> = raw.iter().filter_map(|url| normalize(url)).collect();
    let unique = dedupe(accepted.iter().cloned());

    log::debug!("[input] resolved: raw={} accepted={} unique={}", raw.len(), accepted.len(), unique.len());
    unique
}

fn is_file(path: &Path) -> bool {
    fs::metadata(path).map(|meta| !meta.is_dir()).unwrap_or(false)
}
