//! Severity trend of persisting issues.

use serde::{Deserialize, Serialize};

use crate::domain::{Issue, Severity};
use crate::matcher::{IssueMatch, MatchMethod};

/// Direction of a persisting issue's severity between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTrend {
    /// Moved to a less severe class.
    Improved,
    /// Moved to a more severe class.
    Regressed,
    Unchanged,
}

/// Classify the severity change from `baseline` to `current` by ordinal.
pub fn classify_trend(baseline: Severity, current: Severity) -> SeverityTrend {
    match current.ordinal().cmp(&baseline.ordinal()) {
        std::cmp::Ordering::Greater => SeverityTrend::Improved,
        std::cmp::Ordering::Less => SeverityTrend::Regressed,
        std::cmp::Ordering::Equal => SeverityTrend::Unchanged,
    }
}

/// A matched pair annotated with its severity trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistingIssue {
    pub baseline: Issue,
    pub current: Issue,
    pub method: MatchMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u32>,
    pub trend: SeverityTrend,
}

impl PersistingIssue {
    pub fn is_regression(&self) -> bool {
        self.trend == SeverityTrend::Regressed
    }
}

impl From<IssueMatch> for PersistingIssue {
    fn from(m: IssueMatch) -> Self {
        let trend = classify_trend(m.baseline.severity, m.current.severity);
        Self {
            baseline: m.baseline,
            current: m.current,
            method: m.method,
            confidence: m.confidence,
            trend,
        }
    }
}
