//! Domain models for quxdiff.
//!
//! Canonical definitions for the consumed documents:
//! - `Issue`: A single finding with severity, category and source
//! - `Synthesis`: One run's issue lists plus its overall assessment

pub mod error;
pub mod issue;
pub mod synthesis;

// Re-export main types and errors
pub use error::{QuxError, Result};
pub use issue::{Issue, IssueSource, IssueType, Severity};
pub use synthesis::{OverallAssessment, SeverityCounts, Synthesis};
