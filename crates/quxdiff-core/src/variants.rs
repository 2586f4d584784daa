//! Persisting-variant detection among issues the matcher left unpaired.
//!
//! An issue the synthesis step merely reworded between runs would otherwise
//! show up twice: once as resolved and once as new. Pairs above a looser
//! similarity floor are reported as variants of each other instead.

use serde::{Deserialize, Serialize};

use crate::domain::Issue;
use crate::matcher::{greedy_match, unclaimed, Candidate};
use crate::normalize::{jaccard_similarity, similarity_percent};

/// Default similarity floor for variant pairs.
pub const DEFAULT_VARIANT_THRESHOLD: f64 = 0.35;

/// A current issue recognised as a rewording of a baseline issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistingVariant {
    /// The current-run issue.
    pub issue: Issue,
    /// The baseline issue it continues.
    pub similar_to: Issue,
    /// Rounded similarity percentage.
    pub similarity_score: u32,
}

/// Result of [`detect_variants`]: the final resolved and new partitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantOutcome {
    pub variants: Vec<PersistingVariant>,
    pub resolved: Vec<Issue>,
    pub new: Vec<Issue>,
}

/// Pair leftover baseline and current issues whose similarity reaches
/// `threshold`.
///
/// `threshold` is expected in `[0, 1]`; callers validate it beforehand.
pub fn detect_variants(
    unmatched_baseline: &[Issue],
    unmatched_current: &[Issue],
    threshold: f64,
) -> VariantOutcome {
    let mut candidates = Vec::new();
    for (ci, c) in unmatched_current.iter().enumerate() {
        for (bi, b) in unmatched_baseline.iter().enumerate() {
            let similarity = jaccard_similarity(&c.title, &b.title);
            if similarity >= threshold {
                candidates.push(Candidate {
                    baseline: bi,
                    current: ci,
                    similarity,
                });
            }
        }
    }

    let mut baseline_claimed = vec![false; unmatched_baseline.len()];
    let mut current_claimed = vec![false; unmatched_current.len()];
    let variants: Vec<PersistingVariant> =
        greedy_match(candidates, &mut baseline_claimed, &mut current_claimed)
            .into_iter()
            .map(|pair| {
                let issue = unmatched_current[pair.current].clone();
                let similar_to = unmatched_baseline[pair.baseline].clone();
                tracing::debug!(
                    current_id = %issue.id,
                    baseline_id = %similar_to.id,
                    similarity = pair.similarity,
                    "persisting variant"
                );
                PersistingVariant {
                    issue,
                    similar_to,
                    similarity_score: similarity_percent(pair.similarity),
                }
            })
            .collect();

    crate::obs::emit_variants_detected(variants.len(), threshold);

    VariantOutcome {
        variants,
        resolved: unclaimed(unmatched_baseline, &baseline_claimed),
        new: unclaimed(unmatched_current, &current_claimed),
    }
}
