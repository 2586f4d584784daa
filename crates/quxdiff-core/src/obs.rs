//! Structured observability hooks for comparison runs.
//!
//! This module provides:
//! - A comparison-scoped tracing span via the `CompareSpan` RAII guard
//! - Emission functions for the comparison stages: start, match passes,
//!   variant detection, score adjustment, finish
//!
//! Events are emitted at `info!` level with an `event = "compare.*"` field.
//! For JSON output, pass `json = true` to [`crate::init_tracing`].

use tracing::info;

/// RAII guard that enters a comparison-scoped tracing span.
///
/// # Example
///
/// ```ignore
/// let _span = CompareSpan::enter("run-41", "run-42");
/// // All tracing calls are now associated with baseline = "run-41", current = "run-42"
/// ```
pub struct CompareSpan {
    _span: tracing::span::EnteredSpan,
}

impl CompareSpan {
    /// Create and enter a span tagged with both run labels.
    pub fn enter(baseline_label: &str, current_label: &str) -> Self {
        let span = tracing::info_span!(
            "quxdiff.compare",
            baseline = %baseline_label,
            current = %current_label,
        );
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: comparison started with the issue count of each side.
pub fn emit_compare_started(baseline_issues: usize, current_issues: usize) {
    info!(
        event = "compare.started",
        baseline_issues = baseline_issues,
        current_issues = current_issues,
    );
}

/// Emit event: one matching pass finished.
pub fn emit_match_pass(pass: &str, matched: usize) {
    info!(event = "compare.match_pass", pass = %pass, matched = matched);
}

/// Emit event: variant detection finished.
pub fn emit_variants_detected(variants: usize, threshold: f64) {
    info!(
        event = "compare.variants_detected",
        variants = variants,
        threshold = threshold,
    );
}

/// Emit event: a run's raw and adjusted scores.
pub fn emit_score_adjusted(label: &str, raw_score: f64, adjusted_score: Option<f64>) {
    match adjusted_score {
        Some(adjusted) => info!(
            event = "compare.score_adjusted",
            label = %label,
            raw_score = raw_score,
            adjusted_score = adjusted,
        ),
        None => info!(
            event = "compare.score_adjusted",
            label = %label,
            raw_score = raw_score,
            adjusted = false,
        ),
    }
}

/// Emit event: comparison finished with partition sizes.
pub fn emit_compare_finished(
    resolved: usize,
    new: usize,
    persisting: usize,
    variants: usize,
    regressions: usize,
    score_delta: f64,
) {
    info!(
        event = "compare.finished",
        resolved = resolved,
        new = new,
        persisting = persisting,
        variants = variants,
        regressions = regressions,
        score_delta = score_delta,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_span_create() {
        // Just ensure CompareSpan::enter doesn't panic
        let _span = CompareSpan::enter("baseline", "current");
        emit_compare_started(3, 4);
        emit_score_adjusted("current", 60.0, None);
    }
}
