use crate::scanner::Classifier;
use crate::target::ScanTarget;
use crate::types::{ScanResult, VulnerabilityKind};
use async_trait::async_trait;
use eyre::{Result, WrapErr};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::error::Error as StdError;
use std::time::{Duration, Instant};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const MAX_REDIRECTS: usize = 10;
const TAKEOVER_MARKER: &str = "404 Not Found";
const UNPARSEABLE_RESPONSE: &str = "could not parse response as JSON";

/// Pull the optional `error` string out of a Realtime Database reply.
///
/// `None` when the body is not a JSON object or an `error` value is not a
/// string. A bare `null` is what an empty but readable database returns, so
/// it parses as an object without `error`. The key matches case-insensitively
/// and the last matching key in the document wins.
fn parse_error_field(body: &[u8]) -> Option<Option<String>> {
    let fields = match serde_json::from_slice::<Value>(body).ok()? {
        Value::Null => return Some(None),
        Value::Object(fields) => fields,
        _ => return None,
    };

    let mut error = None;
    for (key, value) in fields {
        if !key.eq_ignore_ascii_case("error") {
            continue;
        }
        match value {
            Value::Null => {}
            Value::String(text) => error = Some(text),
            _ => return None,
        }
    }
    Some(error)
}

/// Map a completed HTTP exchange to a verdict.
///
/// Pure: the same status and body always give the same outcome.
pub fn classify_response(target: &ScanTarget, status: StatusCode, body: &[u8]) -> ScanResult {
    match parse_error_field(body) {
        None if status == StatusCode::OK && !body.is_empty() => {
            ScanResult::vulnerable(target.clone(), VulnerabilityKind::ReadAccess)
        }
        None => ScanResult::failed(target.clone(), UNPARSEABLE_RESPONSE),
        Some(Some(error)) if !error.is_empty() => {
            if error.contains(TAKEOVER_MARKER) {
                ScanResult::vulnerable(target.clone(), VulnerabilityKind::Takeover)
            } else {
                ScanResult::not_vulnerable(target.clone())
            }
        }
        Some(_) => ScanResult::vulnerable(target.clone(), VulnerabilityKind::ReadAccess),
    }
}

/// Fetches `<target>.json` over HTTP(S) with a per-request timeout.
///
/// One instance is shared by every worker; the underlying client pools
/// connections internally.
#[derive(Debug, Clone)]
pub struct FirebaseClassifier {
    client: Client,
    timeout: Duration,
}

impl FirebaseClassifier {
    pub fn new(timeout: Duration) -> Result<Self> {
        log::debug!("[scan::firebase] new: timeout={}ms max_redirects={}", timeout.as_millis(), MAX_REDIRECTS);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("firemon/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .wrap_err("Failed to create HTTP client")?;

        Ok(Self { client, timeout })
    }

    pub fn with_default_timeout() -> Result<Self> {
        Self::new(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Classifier for FirebaseClassifier {
    async fn classify(&self, target: &ScanTarget) -> ScanResult {
        let url = target.json_url();
        log::info!("Checking: {}", url);

        let start = Instant::now();
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("[scan::firebase] request_failed: target={} duration={}ms error={}",
                    target, start.elapsed().as_millis(), e);
                return ScanResult::failed(target.clone(), describe(&e));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                log::debug!("[scan::firebase] body_read_failed: target={} status={} error={}",
                    target, status.as_u16(), e);
                return ScanResult::failed(target.clone(), describe(&e));
            }
        };

        let result = classify_response(target, status, &body);
        log::debug!("[scan::firebase] classified: target={} status={} body_len={} duration={}ms outcome={}",
            target, status.as_u16(), body.len(), start.elapsed().as_millis(), result.outcome);
        result
    }
}

/// Flatten an error and its sources into one line.
fn describe(error: &(dyn StdError + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
