use eyre::{Result, WrapErr};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::{OutputMode, ScanConfig};
use crate::types::{Outcome, ScanResult, ScanSummary};

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub summary: JsonSummary,
    pub results: Vec<JsonResult>,
}

#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub total_scanned: usize,
    pub vulnerable_count: usize,
    pub concurrency: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonResult {
    pub url: String,
    pub vulnerable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerability_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ScanResult> for JsonResult {
    fn from(result: &ScanResult) -> Self {
        Self {
            url: result.target.to_string(),
            vulnerable: result.is_vulnerable(),
            vulnerability_type: result.kind().map(|kind| kind.to_string()),
            error: result.error().map(str::to_string),
        }
    }
}

/// Console lines plus the subset that goes to the output file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TextReport {
    pub lines: Vec<String>,
    pub findings: Vec<String>,
}

pub fn finding_line(result: &ScanResult) -> Option<String> {
    result
        .kind()
        .map(|kind| format!("{} [VULNERABLE : {}]", result.target, kind))
}

pub fn render_text(results: &[ScanResult], config: &ScanConfig) -> TextReport {
    let mut report = TextReport::default();

    for result in results {
        match &result.outcome {
            Outcome::Failed(error) => {
                log::info!("Error checking {}: {}", result.target, error);
            }
            Outcome::Vulnerable(_) => {
                if let Some(line) = finding_line(result) {
                    report.lines.push(line.clone());
                    report.findings.push(line);
                }
            }
            Outcome::NotVulnerable => {
                if config.verbose {
                    report.lines.push(format!("{} [NOT VULNERABLE]", result.target));
                }
            }
        }
    }

    if config.verbose {
        let summary = ScanSummary::from_results(results);
        report.lines.push(String::new());
        report.lines.push(format!(
            "Scan completed. Found {} vulnerable endpoints out of {} total.",
            summary.vulnerable_count, summary.total_scanned
        ));
    }

    report
}

pub fn build_json_report(results: &[ScanResult], config: &ScanConfig) -> JsonReport {
    let summary = ScanSummary::from_results(results);
    JsonReport {
        summary: JsonSummary {
            total_scanned: summary.total_scanned,
            vulnerable_count: summary.vulnerable_count,
            concurrency: config.concurrency,
        },
        results: results.iter().map(JsonResult::from).collect(),
    }
}

pub fn render_json(results: &[ScanResult], config: &ScanConfig) -> Result<String> {
    serde_json::to_string_pretty(&build_json_report(results, config))
        .wrap_err("Failed to serialize JSON report")
}

/// Append finding lines to `path`, creating parent directories as needed.
pub fn append_findings(path: &Path, lines: &[String]) -> Result<()> {
    ensure_parent_dir(path)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("Failed to open {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line).wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    }
    writer.flush().wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Replace `path` with the full JSON document.
pub fn overwrite_json(path: &Path, document: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, document).wrap_err_with(|| format!("Failed to write {}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}

/// Render the results for the console and save them if an output file is set.
///
/// Text mode appends only findings to the file; JSON mode overwrites it with
/// the whole document. A failed save is logged and does not affect the
/// returned console output.
pub fn report(results: &[ScanResult], config: &ScanConfig) -> Result<String> {
    match config.output_mode {
        OutputMode::Text => {
            let text = render_text(results, config);
            if let Some(path) = &config.output_file {
                if !text.findings.is_empty() {
                    save(path, append_findings(path, &text.findings));
                }
            }
            Ok(text.lines.join("\n"))
        }
        OutputMode::Json => {
            let document = render_json(results, config)?;
            if let Some(path) = &config.output_file {
                save(path, overwrite_json(path, &document));
            }
            Ok(document)
        }
    }
}

fn save(path: &Path, outcome: Result<()>) {
    match outcome {
        Ok(()) => log::info!("Results saved to {}", path.display()),
        Err(e) => log::error!("Error saving to file: {:#}", e),
    }
}
