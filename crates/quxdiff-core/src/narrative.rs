//! Short human-readable context for a score change.

use crate::compare::CompareResult;
use crate::domain::Severity;

/// Returned when nothing moved between runs.
pub const NO_CHANGES: &str = "No meaningful changes between runs";

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Explain what drove the score change.
///
/// Clauses, in order and each only for a nonzero count: resolved P0 issues
/// when the score rose; new P0 issues and severity regressions when it fell;
/// reworded-but-unresolved issues regardless of direction. Clauses are joined
/// with `"; "`. The result is empty when partitions changed but no clause
/// applies (e.g. a flat score with only P1/P2 churn).
pub fn generate_score_context(result: &CompareResult) -> String {
    if result.is_quiet() {
        return NO_CHANGES.to_string();
    }

    let mut clauses = Vec::new();

    if result.score_delta > 0.0 {
        let resolved_p0 = result
            .resolved_issues
            .iter()
            .filter(|issue| issue.severity == Severity::P0)
            .count();
        if resolved_p0 > 0 {
            clauses.push(format!(
                "{} resolved",
                plural(resolved_p0, "P0 issue", "P0 issues")
            ));
        }
    }

    if result.score_delta < 0.0 {
        let new_p0 = result
            .new_issues
            .iter()
            .filter(|issue| issue.severity == Severity::P0)
            .count();
        if new_p0 > 0 {
            clauses.push(plural(new_p0, "new P0 issue", "new P0 issues"));
        }
        if !result.regressions.is_empty() {
            clauses.push(plural(
                result.regressions.len(),
                "severity regression",
                "severity regressions",
            ));
        }
    }

    if !result.persisting_variants.is_empty() {
        clauses.push(format!(
            "{} reworded but not resolved",
            plural(result.persisting_variants.len(), "issue", "issues")
        ));
    }

    clauses.join("; ")
}
