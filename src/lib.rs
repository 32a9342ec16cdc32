pub mod cli;
pub mod config;
pub mod input;
pub mod logging;
pub mod report;
pub mod scan;
pub mod scanner;
pub mod target;
pub mod types;

// Re-export key types and functions at the crate root
pub use config::{OutputMode, ScanConfig};
pub use logging::init_logging;
pub use scan::{FirebaseClassifier, classify_response};
pub use scanner::{Classifier, Scheduler};
pub use target::{ScanTarget, dedupe, normalize};
pub use types::{Outcome, ScanResult, ScanSummary, VulnerabilityKind};
