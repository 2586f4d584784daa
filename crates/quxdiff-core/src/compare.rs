//! Cross-run comparison: composes matching, variant detection, regression
//! classification and score adjustment into one [`CompareResult`].

use serde::{Deserialize, Serialize};

use crate::config::CompareOptions;
use crate::domain::{Issue, SeverityCounts, Synthesis};
use crate::matcher::match_issues;
use crate::narrative::generate_score_context;
use crate::obs;
use crate::regression::PersistingIssue;
use crate::score::{calculate_adjusted_score, normalize_score};
use crate::variants::{detect_variants, PersistingVariant};

/// Reconciled diff between a baseline and a current synthesis.
///
/// # Invariants
///
/// Every baseline issue appears exactly once across `persisting_issues`
/// (as `baseline`), `persisting_variants` (as `similar_to`) and
/// `resolved_issues`; every current issue exactly once across
/// `persisting_issues` (as `current`), `persisting_variants` (as `issue`) and
/// `new_issues`. `regressions` is a subset of `persisting_issues`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResult {
    pub baseline_label: String,
    pub current_label: String,
    /// Baseline score on the 0–100 scale.
    pub baseline_score: f64,
    /// Current score on the 0–100 scale.
    pub current_score: f64,
    pub score_delta: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_baseline_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_current_score: Option<f64>,
    /// Present only when both runs have an adjusted score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_delta: Option<f64>,
    pub baseline_readiness: String,
    pub current_readiness: String,
    pub baseline_severity: SeverityCounts,
    pub current_severity: SeverityCounts,
    pub resolved_issues: Vec<Issue>,
    pub new_issues: Vec<Issue>,
    pub persisting_issues: Vec<PersistingIssue>,
    pub persisting_variants: Vec<PersistingVariant>,
    pub regressions: Vec<PersistingIssue>,
    pub narrative: String,
}

impl CompareResult {
    /// Whether no issue changed bucket and no severity regressed.
    pub fn is_quiet(&self) -> bool {
        self.resolved_issues.is_empty()
            && self.new_issues.is_empty()
            && self.persisting_variants.is_empty()
            && self.regressions.is_empty()
    }
}

/// Compare two syntheses.
///
/// `options.variant_threshold` must already be validated (see
/// [`CompareOptions::validate`]); behaviour outside `[0, 1]` is unspecified.
pub fn compare_syntheses(
    baseline: &Synthesis,
    current: &Synthesis,
    baseline_label: &str,
    current_label: &str,
    options: &CompareOptions,
) -> CompareResult {
    let _span = obs::CompareSpan::enter(baseline_label, current_label);

    let baseline_issues: Vec<Issue> = baseline.issues().into_iter().cloned().collect();
    let current_issues: Vec<Issue> = current.issues().into_iter().cloned().collect();
    obs::emit_compare_started(baseline_issues.len(), current_issues.len());

    let matches = match_issues(&baseline_issues, &current_issues);
    let variants = detect_variants(
        &matches.unmatched_baseline,
        &matches.unmatched_current,
        options.variant_threshold,
    );

    let persisting_issues: Vec<PersistingIssue> = matches
        .matched
        .into_iter()
        .map(PersistingIssue::from)
        .collect();
    let regressions: Vec<PersistingIssue> = persisting_issues
        .iter()
        .filter(|p| p.is_regression())
        .cloned()
        .collect();

    let baseline_score = normalize_score(baseline.overall_assessment.score);
    let current_score = normalize_score(current.overall_assessment.score);
    let adjusted_baseline_score = calculate_adjusted_score(baseline);
    let adjusted_current_score = calculate_adjusted_score(current);
    obs::emit_score_adjusted(baseline_label, baseline_score, adjusted_baseline_score);
    obs::emit_score_adjusted(current_label, current_score, adjusted_current_score);

    let adjusted_delta = match (adjusted_baseline_score, adjusted_current_score) {
        (Some(b), Some(c)) => Some(c - b),
        _ => None,
    };

    let mut result = CompareResult {
        baseline_label: baseline_label.to_string(),
        current_label: current_label.to_string(),
        baseline_score,
        current_score,
        score_delta: current_score - baseline_score,
        adjusted_baseline_score,
        adjusted_current_score,
        adjusted_delta,
        baseline_readiness: baseline.overall_assessment.readiness_label.clone(),
        current_readiness: current.overall_assessment.readiness_label.clone(),
        baseline_severity: baseline.severity_counts(),
        current_severity: current.severity_counts(),
        resolved_issues: variants.resolved,
        new_issues: variants.new,
        persisting_issues,
        persisting_variants: variants.variants,
        regressions,
        narrative: String::new(),
    };
    result.narrative = generate_score_context(&result);

    obs::emit_compare_finished(
        result.resolved_issues.len(),
        result.new_issues.len(),
        result.persisting_issues.len(),
        result.persisting_variants.len(),
        result.regressions.len(),
        result.score_delta,
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IssueSource, Severity};
    use crate::regression::SeverityTrend;

    #[test]
    fn test_identical_runs_are_quiet() {
        let snapshot = Synthesis::new(80.0, "ready")
            .with_consensus(Issue::new("QUX-aaaa", "Login broken", Severity::P0));
        let result = compare_syntheses(
            &snapshot,
            &snapshot,
            "a",
            "b",
            &CompareOptions::default(),
        );
        assert!(result.is_quiet());
        assert_eq!(result.persisting_issues.len(), 1);
        assert_eq!(result.score_delta, 0.0);
        assert_eq!(result.narrative, "No meaningful changes between runs");
    }

    #[test]
    fn test_regression_subset_and_scores() {
        let baseline = Synthesis::new(7.0, "ready-with-caveats")
            .with_consensus(Issue::new("QUX-00000001", "Cart empties", Severity::P2))
            .with_consensus(Issue::new("QUX-00000002", "Spinner flickers", Severity::P1));
        let current = Synthesis::new(55.0, "not-ready")
            .with_consensus(Issue::new("QUX-00000001", "Cart empties", Severity::P0))
            .with_consensus(Issue::new("QUX-00000002", "Spinner flickers", Severity::P2));

        let result = compare_syntheses(&baseline, &current, "v1", "v2", &CompareOptions::default());

        assert_eq!(result.baseline_score, 70.0);
        assert_eq!(result.score_delta, -15.0);
        assert_eq!(result.persisting_issues.len(), 2);
        assert_eq!(result.persisting_issues[1].trend, SeverityTrend::Improved);
        assert_eq!(result.regressions.len(), 1);
        assert_eq!(result.regressions[0].current.id, "QUX-00000001");
        assert_eq!(result.current_severity.p0, 1);
        assert_eq!(result.baseline_severity, baseline.severity_counts());
        assert_eq!(result.baseline_readiness, "ready-with-caveats");
        assert_eq!(result.narrative, "1 severity regression");
    }

    #[test]
    fn test_adjusted_delta_requires_both_sides() {
        let infra = Issue::new("QUX-0000000a", "Fixture stale", Severity::P1)
            .with_source(IssueSource::TestInfra);
        let baseline = Synthesis::new(60.0, "not-ready").with_consensus(infra.clone());
        let current = Synthesis::new(70.0, "not-ready");

        let result = compare_syntheses(&baseline, &current, "a", "b", &CompareOptions::default());
        assert!(result.adjusted_baseline_score.is_some());
        assert!(result.adjusted_current_score.is_none());
        assert!(result.adjusted_delta.is_none());

        let current = Synthesis::new(70.0, "not-ready").with_consensus(infra);
        let result = compare_syntheses(&baseline, &current, "a", "b", &CompareOptions::default());
        // 100 - 40 * 0.25 = 90; 100 - 30 * 0.25 = 92.5 -> 93
        assert_eq!(result.adjusted_baseline_score, Some(90.0));
        assert_eq!(result.adjusted_current_score, Some(93.0));
        assert_eq!(result.adjusted_delta, Some(3.0));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let snapshot = Synthesis::new(80.0, "ready");
        let result = compare_syntheses(&snapshot, &snapshot, "a", "b", &CompareOptions::default());
        let value = serde_json::to_value(&result).expect("serialize");
        let obj = value.as_object().expect("object");
        for key in [
            "scoreDelta",
            "resolvedIssues",
            "newIssues",
            "persistingIssues",
            "persistingVariants",
            "regressions",
            "baselineSeverity",
            "narrative",
        ] {
            assert!(obj.contains_key(key), "missing key: {}", key);
        }
        assert!(!obj.contains_key("adjustedDelta"));
    }
}
