//! Comparison options and their sources.
//!
//! Precedence, lowest first: built-in defaults, a TOML file, the
//! `QUXDIFF_VARIANT_THRESHOLD` environment variable, then explicit overrides
//! applied by the caller (e.g. a CLI flag).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{QuxError, Result};
use crate::variants::DEFAULT_VARIANT_THRESHOLD;

/// Environment variable overriding [`CompareOptions::variant_threshold`].
pub const VARIANT_THRESHOLD_ENV: &str = "QUXDIFF_VARIANT_THRESHOLD";

/// Options accepted by [`crate::compare_syntheses`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Similarity floor for persisting-variant pairs, in `[0, 1]`.
    pub variant_threshold: f64,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            variant_threshold: DEFAULT_VARIANT_THRESHOLD,
        }
    }
}

impl CompareOptions {
    /// Override the variant threshold.
    pub fn with_variant_threshold(mut self, threshold: f64) -> Self {
        self.variant_threshold = threshold;
        self
    }

    /// Parse options from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load options from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Apply `QUXDIFF_VARIANT_THRESHOLD` when it is set.
    pub fn with_env_overrides(self) -> Result<Self> {
        match std::env::var(VARIANT_THRESHOLD_ENV) {
            Ok(raw) => self.with_threshold_override(&raw),
            Err(_) => Ok(self),
        }
    }

    fn with_threshold_override(self, raw: &str) -> Result<Self> {
        let threshold: f64 = raw.trim().parse().map_err(|_| {
            QuxError::Config(format!(
                "{} is not a number: {:?}",
                VARIANT_THRESHOLD_ENV, raw
            ))
        })?;
        Ok(self.with_variant_threshold(threshold))
    }

    /// Reject thresholds outside `[0, 1]`.
    ///
    /// The comparison itself does not re-check; call this at the boundary.
    pub fn validate(&self) -> Result<()> {
        let t = self.variant_threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(QuxError::InvalidVariantThreshold(t));
        }
        Ok(())
    }
}
