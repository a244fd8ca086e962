use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};
use crate::trend::DEFAULT_TREND_THRESHOLD;

/// Thresholds used by the insight pipeline. Fields missing from a config
/// file keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub trend_threshold: f64,
    pub excellent_attendance: f64,
    pub good_attendance: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            trend_threshold: DEFAULT_TREND_THRESHOLD,
            excellent_attendance: 95.0,
            good_attendance: 90.0,
        }
    }
}

impl InsightConfig {
    pub fn validate(&self) -> Result<()> {
        if self.trend_threshold.is_nan() || self.trend_threshold < 0.0 {
            return Err(AnalyticsError::InvalidConfig(format!(
                "trend_threshold must be non-negative, got {}",
                self.trend_threshold
            )));
        }
        if self.good_attendance > self.excellent_attendance {
            return Err(AnalyticsError::InvalidConfig(format!(
                "good_attendance ({}) exceeds excellent_attendance ({})",
                self.good_attendance, self.excellent_attendance
            )));
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        let config: InsightConfig =
            serde_json::from_str(raw).context("config is not valid JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
