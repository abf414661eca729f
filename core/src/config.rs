use crate::{discipline::DEFAULT_GRACE_DAYS, weights::ServiceWeights};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_grace_days() -> u32 {
    DEFAULT_GRACE_DAYS
}

/// Engine configuration. Immutable once handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub service_weights: ServiceWeights,
    /// Grace period used when a submission does not carry its own.
    #[serde(default = "default_grace_days")]
    pub default_grace_days: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            service_weights:    ServiceWeights::default(),
            default_grace_days: DEFAULT_GRACE_DAYS,
        }
    }
}

impl ScoringConfig {
    /// Load from a JSON file such as:
    ///
    /// ```json
    /// { "service_weights": { "SEO": 1.5 }, "default_grace_days": 5 }
    /// ```
    ///
    /// A present `service_weights` table replaces the built-in one entirely.
    /// In tests, use ScoringConfig::default_test().
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let config: ScoringConfig = serde_json::from_str(&content)
            .with_context(|| format!("Cannot parse {}", path.display()))?;
        log::debug!(
            "config: loaded {} service weights from {}",
            config.service_weights.len(),
            path.display()
        );
        Ok(config)
    }

    /// Config with hardcoded defaults for use in tests.
    pub fn default_test() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, weights: ServiceWeights) -> Self {
        self.service_weights = weights;
        self
    }
}
