//! Two-pass reconciliation of a baseline issue list against a current one.
//!
//! Pass 1 pairs issues that carry the same stable id. Pass 2 pairs the
//! leftovers by title similarity, with a relaxed threshold when category and
//! severity corroborate the match. Both pass 2 and the variant search in
//! [`crate::variants`] assign pairs through [`greedy_match`].

use serde::{Deserialize, Serialize};

use crate::domain::Issue;
use crate::normalize::{jaccard_similarity, similarity_percent};
use crate::stable_id::is_stable_id;

/// Similarity above which a pair matches unconditionally.
pub const FUZZY_THRESHOLD: f64 = 0.6;

/// Similarity above which a pair matches when category and severity agree.
pub const RELAXED_THRESHOLD: f64 = 0.4;

/// How a persisting pair was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMethod {
    ExactId,
    Fuzzy,
}

impl MatchMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExactId => "exact-id",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// A baseline issue paired with its continuation in the current run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueMatch {
    pub baseline: Issue,
    pub current: Issue,
    pub method: MatchMethod,
    /// Rounded similarity percentage. Absent for exact-id matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u32>,
}

/// Result of [`match_issues`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    pub matched: Vec<IssueMatch>,
    pub unmatched_baseline: Vec<Issue>,
    pub unmatched_current: Vec<Issue>,
}

/// A candidate pairing, by index into the baseline and current slices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub baseline: usize,
    pub current: usize,
    pub similarity: f64,
}

/// Greedily assign disjoint pairs from `candidates`, highest similarity first.
///
/// A candidate is committed only when neither side is already claimed; the
/// claimed flags are updated in place so earlier passes can pre-claim issues.
/// Equal similarities are broken by lowest baseline index, then lowest current
/// index. Returns the committed candidates in assignment order.
pub fn greedy_match(
    mut candidates: Vec<Candidate>,
    baseline_claimed: &mut [bool],
    current_claimed: &mut [bool],
) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then(a.baseline.cmp(&b.baseline))
            .then(a.current.cmp(&b.current))
    });

    let mut assigned = Vec::new();
    for candidate in candidates {
        if baseline_claimed[candidate.baseline] || current_claimed[candidate.current] {
            continue;
        }
        baseline_claimed[candidate.baseline] = true;
        current_claimed[candidate.current] = true;
        assigned.push(candidate);
    }
    assigned
}

fn is_fuzzy_candidate(baseline: &Issue, current: &Issue, similarity: f64) -> bool {
    if similarity > FUZZY_THRESHOLD {
        return true;
    }
    baseline.category.is_some()
        && baseline.category == current.category
        && baseline.severity == current.severity
        && similarity > RELAXED_THRESHOLD
}

/// Reconcile `baseline` against `current`.
///
/// Every input issue ends up either in exactly one `matched` pair or in the
/// corresponding unmatched list, which preserves input order.
pub fn match_issues(baseline: &[Issue], current: &[Issue]) -> MatchOutcome {
    let mut baseline_claimed = vec![false; baseline.len()];
    let mut current_claimed = vec![false; current.len()];
    let mut matched = Vec::new();

    // Pass 1: exact stable id.
    for (bi, b) in baseline.iter().enumerate() {
        if !is_stable_id(&b.id) {
            continue;
        }
        let hit = current
            .iter()
            .enumerate()
            .find(|(ci, c)| !current_claimed[*ci] && c.id == b.id);
        if let Some((ci, c)) = hit {
            baseline_claimed[bi] = true;
            current_claimed[ci] = true;
            tracing::debug!(id = %b.id, "exact-id match");
            matched.push(IssueMatch {
                baseline: b.clone(),
                current: c.clone(),
                method: MatchMethod::ExactId,
                confidence: None,
            });
        }
    }
    let exact_count = matched.len();

    // Pass 2: fuzzy title similarity over the leftovers.
    let mut candidates = Vec::new();
    for (bi, b) in baseline.iter().enumerate() {
        if baseline_claimed[bi] {
            continue;
        }
        for (ci, c) in current.iter().enumerate() {
            if current_claimed[ci] {
                continue;
            }
            let similarity = jaccard_similarity(&b.title, &c.title);
            if is_fuzzy_candidate(b, c, similarity) {
                candidates.push(Candidate {
                    baseline: bi,
                    current: ci,
                    similarity,
                });
            }
        }
    }

    for pair in greedy_match(candidates, &mut baseline_claimed, &mut current_claimed) {
        let b = &baseline[pair.baseline];
        let c = &current[pair.current];
        tracing::debug!(
            baseline_id = %b.id,
            current_id = %c.id,
            similarity = pair.similarity,
            "fuzzy match"
        );
        matched.push(IssueMatch {
            baseline: b.clone(),
            current: c.clone(),
            method: MatchMethod::Fuzzy,
            confidence: Some(similarity_percent(pair.similarity)),
        });
    }

    crate::obs::emit_match_pass("exact-id", exact_count);
    crate::obs::emit_match_pass("fuzzy", matched.len() - exact_count);

    MatchOutcome {
        matched,
        unmatched_baseline: unclaimed(baseline, &baseline_claimed),
        unmatched_current: unclaimed(current, &current_claimed),
    }
}

/// Issues whose claimed flag is still false, in input order.
pub(crate) fn unclaimed(issues: &[Issue], claimed: &[bool]) -> Vec<Issue> {
    issues
        .iter()
        .zip(claimed)
        .filter(|(_, claimed)| !**claimed)
        .map(|(issue, _)| issue.clone())
        .collect()
}
