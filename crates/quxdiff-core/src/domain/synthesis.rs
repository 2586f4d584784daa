//! Synthesis snapshots: the materialized output of one analysis run.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::issue::{Issue, IssueType, Severity};

/// Overall verdict of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallAssessment {
    /// Readiness score on a 0–100 scale, or 0–10 for legacy documents.
    pub score: f64,
    /// Categorical label such as `ready` or `not-ready`. Passed through unchanged.
    pub readiness_label: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An immutable snapshot of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Synthesis {
    #[serde(default)]
    pub consensus_issues: Vec<Issue>,
    #[serde(default)]
    pub video_only_issues: Vec<Issue>,
    #[serde(default)]
    pub model_unique_issues: Vec<Issue>,
    pub overall_assessment: OverallAssessment,
    /// Top-level fields such as `summary`, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Synthesis {
    /// Create an empty snapshot with the given score and label.
    pub fn new(score: f64, readiness_label: impl Into<String>) -> Self {
        Self {
            consensus_issues: Vec::new(),
            video_only_issues: Vec::new(),
            model_unique_issues: Vec::new(),
            overall_assessment: OverallAssessment {
                score,
                readiness_label: readiness_label.into(),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn with_consensus(mut self, issue: Issue) -> Self {
        self.consensus_issues.push(issue);
        self
    }

    pub fn with_video_only(mut self, issue: Issue) -> Self {
        self.video_only_issues.push(issue);
        self
    }

    pub fn with_model_unique(mut self, issue: Issue) -> Self {
        self.model_unique_issues.push(issue);
        self
    }

    /// All issues paired with the list they appear in, in list order
    /// (consensus, video-only, model-unique).
    pub fn listed_issues(&self) -> impl Iterator<Item = (IssueType, &Issue)> {
        self.consensus_issues
            .iter()
            .map(|i| (IssueType::Consensus, i))
            .chain(self.video_only_issues.iter().map(|i| (IssueType::VideoOnly, i)))
            .chain(
                self.model_unique_issues
                    .iter()
                    .map(|i| (IssueType::ModelUnique, i)),
            )
    }

    /// Flattened issue sequence in list order.
    pub fn issues(&self) -> Vec<&Issue> {
        self.listed_issues().map(|(_, issue)| issue).collect()
    }

    pub fn issue_count(&self) -> usize {
        self.consensus_issues.len() + self.video_only_issues.len() + self.model_unique_issues.len()
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        SeverityCounts::from_issues(self.listed_issues().map(|(_, issue)| issue))
    }
}

/// Per-run histogram of issue severities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCounts {
    pub p0: usize,
    pub p1: usize,
    pub p2: usize,
}

impl SeverityCounts {
    pub fn from_issues<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::P0 => counts.p0 += 1,
                Severity::P1 => counts.p1 += 1,
                Severity::P2 => counts.p2 += 1,
            }
        }
        counts
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::P0 => self.p0,
            Severity::P1 => self.p1,
            Severity::P2 => self.p2,
        }
    }

    pub fn total(&self) -> usize {
        self.p0 + self.p1 + self.p2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Synthesis {
        Synthesis::new(72.0, "ready-with-caveats")
            .with_consensus(Issue::new("A", "Login broken", Severity::P0))
            .with_video_only(Issue::new("B", "Spinner flickers", Severity::P2))
            .with_model_unique(Issue::new("C", "Copy truncated", Severity::P1))
            .with_consensus(Issue::new("D", "Cart empties", Severity::P0))
    }

    #[test]
    fn test_issues_flatten_in_list_order() {
        let synthesis = sample();
        let ids: Vec<&str> = synthesis.issues().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "D", "B", "C"]);
        assert_eq!(synthesis.issue_count(), 4);
    }

    #[test]
    fn test_severity_counts() {
        let counts = sample().severity_counts();
        assert_eq!(counts.p0, 2);
        assert_eq!(counts.p1, 1);
        assert_eq!(counts.p2, 1);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.get(Severity::P0), 2);
        assert_eq!(counts.get(Severity::P2), 1);
    }

    #[test]
    fn test_deserialize_upstream_document() {
        let doc = serde_json::json!({
            "consensusIssues": [
                {"id": "QUX-1a2b3c4d", "title": "[P0] Login broken", "severity": "P0", "category": "auth"}
            ],
            "videoOnlyIssues": [],
            "overallAssessment": {"score": 6.5, "readinessLabel": "not-ready"},
            "summary": "Checkout flow blocked"
        });
        let synthesis: Synthesis = serde_json::from_value(doc).expect("deserialize");
        assert_eq!(synthesis.consensus_issues.len(), 1);
        assert!(synthesis.model_unique_issues.is_empty());
        assert_eq!(synthesis.overall_assessment.readiness_label, "not-ready");
        assert_eq!(synthesis.extra["summary"], "Checkout flow blocked");
    }

    #[test]
    fn test_unmodeled_fields_survive_round_trip() {
        let doc = serde_json::json!({
            "summary": "keep me",
            "consensusIssues": [
                {"id": "1", "title": "Login broken", "severity": "P0", "category": "auth",
                 "evidence": ["t=3s"]}
            ],
            "overallAssessment": {"score": 60, "readinessLabel": "not-ready", "rationale": "x"}
        });
        let synthesis: Synthesis = serde_json::from_value(doc).expect("deserialize");
        assert_eq!(synthesis.consensus_issues[0].extra["evidence"][0], "t=3s");

        let back = serde_json::to_value(&synthesis).expect("serialize");
        assert_eq!(back["summary"], "keep me");
        assert_eq!(back["consensusIssues"][0]["evidence"][0], "t=3s");
        assert_eq!(back["overallAssessment"]["rationale"], "x");
        assert_eq!(back["overallAssessment"]["readinessLabel"], "not-ready");
    }
}
