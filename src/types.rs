use crate::target::ScanTarget;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VulnerabilityKind {
    /// The database root is readable without credentials.
    ReadAccess,
    /// The hostname resolves but the database behind it is gone.
    Takeover,
}

impl VulnerabilityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VulnerabilityKind::ReadAccess => "READ ACCESS",
            VulnerabilityKind::Takeover => "TAKEOVER",
        }
    }
}

impl fmt::Display for VulnerabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal state of one check. A failure never carries a classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Vulnerable(VulnerabilityKind),
    NotVulnerable,
    Failed(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Vulnerable(kind) => write!(f, "vulnerable({})", kind),
            Outcome::NotVulnerable => f.write_str("not_vulnerable"),
            Outcome::Failed(error) => write!(f, "failed({})", error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub target: ScanTarget,
    pub outcome: Outcome,
}

impl ScanResult {
    pub fn vulnerable(target: ScanTarget, kind: VulnerabilityKind) -> Self {
        Self {
            target,
            outcome: Outcome::Vulnerable(kind),
        }
    }

    pub fn not_vulnerable(target: ScanTarget) -> Self {
        Self {
            target,
            outcome: Outcome::NotVulnerable,
        }
    }

    pub fn failed(target: ScanTarget, error: impl Into<String>) -> Self {
        Self {
            target,
            outcome: Outcome::Failed(error.into()),
        }
    }

    pub fn is_vulnerable(&self) -> bool {
        matches!(self.outcome, Outcome::Vulnerable(_))
    }

    pub fn kind(&self) -> Option<VulnerabilityKind> {
        match self.outcome {
            Outcome::Vulnerable(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Counts over a finished scan. Recomputed for every report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub total_scanned: usize,
    pub vulnerable_count: usize,
    pub not_vulnerable_count: usize,
    pub failed_count: usize,
}

impl ScanSummary {
    pub fn from_results(results: &[ScanResult]) -> Self {
        results.iter().fold(
            Self {
                total_scanned: results.len(),
                ..Self::default()
            },
            |mut summary, result| {
                match result.outcome {
                    Outcome::Vulnerable(_) => summary.vulnerable_count += 1,
                    Outcome::NotVulnerable => summary.not_vulnerable_count += 1,
                    Outcome::Failed(_) => summary.failed_count += 1,
                }
                summary
            },
        )
    }
}
