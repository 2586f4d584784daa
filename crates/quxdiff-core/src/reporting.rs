use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::compare::CompareResult;
use crate::domain::{Severity, Synthesis};
use crate::regression::SeverityTrend;

/// Schema version of [`CompareReportArtifact`].
pub const REPORT_SCHEMA_VERSION: &str = "1.0";

/// Canonical comparison artifact written for CI and release reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompareReportArtifact {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub result: CompareResult,
}

impl CompareReportArtifact {
    pub fn new(result: CompareResult) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            result,
        }
    }
}

/// Read a synthesis snapshot from a JSON file.
pub fn read_synthesis(path: &Path) -> Result<Synthesis> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("read synthesis {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("invalid synthesis JSON in {:?}", path))
}

/// Write the comparison artifact in pretty JSON format.
pub fn write_compare_json(path: &Path, artifact: &CompareReportArtifact) -> Result<()> {
    let content = serde_json::to_string_pretty(artifact).context("serialize compare artifact")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.1}", score)
    }
}

fn format_delta(delta: f64) -> String {
    if delta > 0.0 {
        format!("+{}", format_score(delta))
    } else {
        format_score(delta)
    }
}

fn trend_marker(trend: SeverityTrend) -> &'static str {
    match trend {
        SeverityTrend::Improved => "improved",
        SeverityTrend::Regressed => "REGRESSED",
        SeverityTrend::Unchanged => "unchanged",
    }
}

/// Render a markdown summary for PR/comment/check output.
pub fn render_compare_md(result: &CompareResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# Comparison: {} vs {}\n\n",
        result.baseline_label, result.current_label
    ));
    out.push_str(&format!("> {}\n\n", result.narrative));

    out.push_str("## Score\n");
    out.push_str(&format!(
        "- {}: {} ({})\n- {}: {} ({})\n- delta: {}\n",
        result.baseline_label,
        format_score(result.baseline_score),
        result.baseline_readiness,
        result.current_label,
        format_score(result.current_score),
        result.current_readiness,
        format_delta(result.score_delta),
    ));
    if let Some(delta) = result.adjusted_delta {
        out.push_str(&format!("- adjusted delta: {}\n", format_delta(delta)));
    }
    out.push('\n');

    out.push_str("## Severity\n| |");
    for severity in Severity::ALL {
        out.push_str(&format!(" {} |", severity));
    }
    out.push_str("\n|---|---|---|---|\n");
    for (label, counts) in [
        (&result.baseline_label, &result.baseline_severity),
        (&result.current_label, &result.current_severity),
    ] {
        out.push_str(&format!("| {} |", label));
        for severity in Severity::ALL {
            out.push_str(&format!(" {} |", counts.get(severity)));
        }
        out.push('\n');
    }
    out.push('\n');

    out.push_str("## Issues\n");
    out.push_str(&format!(
        "- resolved: {}\n- new: {}\n- persisting: {}\n- reworded: {}\n- regressions: {}\n",
        result.resolved_issues.len(),
        result.new_issues.len(),
        result.persisting_issues.len(),
        result.persisting_variants.len(),
        result.regressions.len(),
    ));

    if !result.resolved_issues.is_empty() {
        out.push_str("\n### Resolved\n");
        for issue in &result.resolved_issues {
            out.push_str(&format!("- [{}] {}\n", issue.severity, issue.title));
        }
    }
    if !result.new_issues.is_empty() {
        out.push_str("\n### New\n");
        for issue in &result.new_issues {
            out.push_str(&format!("- [{}] {}\n", issue.severity, issue.title));
        }
    }
    if !result.persisting_issues.is_empty() {
        out.push_str("\n### Persisting\n");
        for p in &result.persisting_issues {
            out.push_str(&format!(
                "- [{} → {}] {} ({}, {})\n",
                p.baseline.severity,
                p.current.severity,
                p.current.title,
                p.method.as_str(),
                trend_marker(p.trend),
            ));
        }
    }
    if !result.persisting_variants.is_empty() {
        out.push_str("\n### Reworded\n");
        for v in &result.persisting_variants {
            out.push_str(&format!(
                "- {} (was: {}, {}% similar)\n",
                v.issue.title, v.similar_to.title, v.similarity_score
            ));
        }
    }
    out
}

/// Write the markdown summary.
pub fn write_compare_md(path: &Path, result: &CompareResult) -> Result<()> {
    let md = render_compare_md(result);
    std::fs::write(path, md).with_context(|| format!("write {:?}", path))?;
    Ok(())
}
