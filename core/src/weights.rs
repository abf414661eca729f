//! Service weight registry.
//!
//! Maps a service name to how much one point of completion in that service
//! counts toward a client's scope score. Unknown services weigh 1.0, so new
//! service types work without a config change.

use crate::error::{ScoreError, ScoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct ServiceWeights {
    weights: BTreeMap<String, f64>,
}

impl ServiceWeights {
    /// Build a registry from explicit entries. Every weight must be finite
    /// and strictly positive.
    pub fn new<I, S>(entries: I) -> ScoreResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut weights = BTreeMap::new();
        for (service, weight) in entries {
            let service = service.into();
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ScoreError::InvalidWeight { service, weight });
            }
            weights.insert(service, weight);
        }
        Ok(Self { weights })
    }

    /// Registry with no entries: every service weighs 1.0.
    pub fn uniform() -> Self {
        Self { weights: BTreeMap::new() }
    }

    pub fn weight_of(&self, service: &str) -> f64 {
        self.weights.get(service).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for ServiceWeights {
    fn default() -> Self {
        let weights = [
            ("Website Maintenance", 1.0),
            ("SEO",                 1.2),
            ("GBP SEO",             1.0),
            ("Social Media",        1.1),
            ("Google Ads",          1.2),
            ("Meta Ads",            1.2),
            ("AI",                  0.8),
        ]
        .into_iter()
        .map(|(name, w)| (name.to_string(), w))
        .collect();
        Self { weights }
    }
}

impl TryFrom<BTreeMap<String, f64>> for ServiceWeights {
    type Error = ScoreError;

    fn try_from(map: BTreeMap<String, f64>) -> ScoreResult<Self> {
        Self::new(map)
    }
}

impl From<ServiceWeights> for BTreeMap<String, f64> {
    fn from(w: ServiceWeights) -> Self {
        w.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_services_use_table_weight() {
        let w = ServiceWeights::default();
        assert_eq!(w.weight_of("SEO"), 1.2);
        assert_eq!(w.weight_of("AI"), 0.8);
        assert_eq!(w.weight_of("Social Media"), 1.1);
    }

    #[test]
    fn unknown_service_weighs_one() {
        let w = ServiceWeights::default();
        assert_eq!(w.weight_of("Podcast Editing"), 1.0);
        assert_eq!(ServiceWeights::uniform().weight_of("SEO"), 1.0);
    }

    #[test]
    fn rejects_non_positive_weights() {
        let err = ServiceWeights::new([("SEO", 0.0)]).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidWeight { .. }), "got {err}");
        assert!(ServiceWeights::new([("SEO", f64::NAN)]).is_err());
        assert!(ServiceWeights::new([("SEO", -1.0)]).is_err());
    }

    #[test]
    fn deserializes_from_plain_map() {
        let w: ServiceWeights = serde_json::from_str(r#"{"SEO": 2.0}"#).unwrap();
        assert_eq!(w.weight_of("SEO"), 2.0);
        assert!(serde_json::from_str::<ServiceWeights>(r#"{"SEO": -2.0}"#).is_err());
    }
}
