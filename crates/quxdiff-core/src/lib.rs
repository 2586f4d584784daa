//! quxdiff Core Library
//!
//! Reconciles the issues of two analysis runs (a baseline and a current
//! snapshot) and reports which were resolved, which are new, which persisted
//! or were merely reworded, which regressed in severity, and how the
//! readiness score moved once test-harness issues are discounted.

pub mod compare;
pub mod config;
pub mod domain;
pub mod matcher;
pub mod narrative;
pub mod normalize;
pub mod obs;
pub mod regression;
pub mod reporting;
pub mod score;
pub mod stable_id;
pub mod telemetry;
pub mod variants;

pub use compare::{compare_syntheses, CompareResult};
pub use config::{CompareOptions, VARIANT_THRESHOLD_ENV};
pub use domain::{
    Issue, IssueSource, IssueType, OverallAssessment, QuxError, Result, Severity, SeverityCounts,
    Synthesis,
};
pub use matcher::{
    greedy_match, match_issues, Candidate, IssueMatch, MatchMethod, MatchOutcome,
    FUZZY_THRESHOLD, RELAXED_THRESHOLD,
};
pub use narrative::{generate_score_context, NO_CHANGES};
pub use normalize::{jaccard_similarity, normalize_title, similarity_percent};
pub use regression::{classify_trend, PersistingIssue, SeverityTrend};
pub use reporting::{
    read_synthesis, render_compare_md, write_compare_json, write_compare_md,
    CompareReportArtifact, REPORT_SCHEMA_VERSION,
};
pub use score::{calculate_adjusted_score, normalize_score, TEST_INFRA_WEIGHT_FACTOR};
pub use stable_id::{generate_stable_id, is_stable_id, stamp_stable_ids, STABLE_ID_PREFIX};
pub use variants::{
    detect_variants, PersistingVariant, VariantOutcome, DEFAULT_VARIANT_THRESHOLD,
};

pub use obs::{
    emit_compare_finished, emit_compare_started, emit_match_pass, emit_score_adjusted,
    emit_variants_detected, CompareSpan,
};
pub use telemetry::init_tracing;

/// quxdiff version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
