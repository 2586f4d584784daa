//! Readiness score normalization and test-infra discounting.
//!
//! Scores on legacy documents were recorded on a 0–10 scale. Anything at or
//! below 10 is read as legacy and scaled up, so a genuine 0–100 score of 10
//! or less cannot be told apart from a legacy one. That limitation is kept
//! as-is until the producers of those documents confirm their ranges.

use crate::domain::Synthesis;

/// Share of its severity weight a test-infra issue keeps.
pub const TEST_INFRA_WEIGHT_FACTOR: f64 = 0.25;

/// Bring a score onto the 0–100 scale.
pub fn normalize_score(score: f64) -> f64 {
    if score <= 10.0 {
        score * 10.0
    } else {
        score
    }
}

/// Score with test-infra issues discounted to a quarter of their weight.
///
/// Returns `None` when the snapshot has no test-infra issues: the raw score
/// stands and no adjustment applies.
pub fn calculate_adjusted_score(synthesis: &Synthesis) -> Option<f64> {
    let issues = synthesis.issues();
    if !issues.iter().any(|issue| issue.is_test_infra()) {
        return None;
    }

    let raw_score = normalize_score(synthesis.overall_assessment.score);
    let points_lost = 100.0 - raw_score;
    if points_lost <= 0.0 {
        return Some(raw_score);
    }

    let total_weight: f64 = issues.iter().map(|issue| issue.severity.weight()).sum();
    let test_infra_weight: f64 = issues
        .iter()
        .filter(|issue| issue.is_test_infra())
        .map(|issue| issue.severity.weight())
        .sum();
    if total_weight == 0.0 {
        return Some(raw_score);
    }

    let adjusted_total =
        (total_weight - test_infra_weight) + test_infra_weight * TEST_INFRA_WEIGHT_FACTOR;
    let adjusted_points_lost = points_lost * (adjusted_total / total_weight);
    let adjusted = (100.0 - adjusted_points_lost).round();

    tracing::debug!(
        raw_score,
        adjusted,
        total_weight,
        test_infra_weight,
        "score adjusted for test-infra issues"
    );
    Some(adjusted)
}
