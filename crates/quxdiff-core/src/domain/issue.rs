//! Issue records as produced by the upstream synthesis step.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Issue severity. `P0` is the most severe.
///
/// The derived ordering follows the ordinal (`P0 < P1 < P2`), so a *larger*
/// value means a *less* severe issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    P0,
    P1,
    P2,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::P0, Severity::P1, Severity::P2];

    /// Fixed ordinal: `P0 = 0`, `P1 = 1`, `P2 = 2`.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::P0 => 0,
            Self::P1 => 1,
            Self::P2 => 2,
        }
    }

    /// Weight used when distributing lost readiness points across issues.
    pub fn weight(self) -> f64 {
        match self {
            Self::P0 => 10.0,
            Self::P1 => 5.0,
            Self::P2 => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which list of the synthesis an issue was reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    Consensus,
    VideoOnly,
    ModelUnique,
}

impl IssueType {
    /// Discriminator used for stable ids when an issue has no category.
    pub fn fallback_discriminator(self) -> &'static str {
        match self {
            Self::Consensus => "consensus",
            Self::VideoOnly => "video",
            Self::ModelUnique => "model-unique",
        }
    }
}

/// Whether an issue is a product defect or an artifact of the test harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueSource {
    #[default]
    App,
    TestInfra,
}

/// A single issue reported by a synthesis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Stable id (`QUX-xxxxxxxx`) or a legacy per-run ordinal.
    pub id: String,
    pub title: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
    #[serde(default)]
    pub source: IssueSource,
    /// Upstream fields quxdiff does not interpret, kept for write-back.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Issue {
    /// Create an app-sourced issue with no category.
    pub fn new(id: impl Into<String>, title: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            severity,
            category: None,
            issue_type: None,
            source: IssueSource::App,
            extra: Map::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_source(mut self, source: IssueSource) -> Self {
        self.source = source;
        self
    }

    pub fn is_test_infra(&self) -> bool {
        self.source == IssueSource::TestInfra
    }

    /// Discriminator for stable id generation: the category when present,
    /// otherwise a fixed literal derived from the issue's list.
    pub fn discriminator(&self, listed_as: IssueType) -> &str {
        match self.category.as_deref() {
            Some(category) => category,
            None => self
                .issue_type
                .unwrap_or(listed_as)
                .fallback_discriminator(),
        }
    }
}
