//! Enrichment result types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

/// Maliciousness verdict reported by a threat-intelligence provider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Verdict {
    Malicious,
    Suspicious,
    Harmless,
    Unknown,
}

/// Verdict plus provider-specific details.
///
/// `details` keeps the provider's insertion order so the formatted
/// annotation is stable. Values may be scalars, arrays or nested objects
/// such as `last_analysis_stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub verdict: Verdict,
    #[serde(default)]
    pub details: Map<String, Value>,
}

impl EnrichmentResult {
    pub fn new(verdict: Verdict) -> Self {
        Self {
            verdict,
            details: Map::new(),
        }
    }

    /// Appends a detail entry, replacing any previous value for `key`.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_details_keep_insertion_order() {
        let result = EnrichmentResult::new(Verdict::Suspicious)
            .with_detail("zeta", 1)
            .with_detail("alpha", "x")
            .with_detail("mid", json!({"b": 1, "a": 2}));

        let keys: Vec<&str> = result.details.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_verdict_labels_round_trip_through_serde() {
        let result: EnrichmentResult =
            serde_json::from_str(r#"{"verdict":"harmless"}"#).expect("valid json");
        assert_eq!(result.verdict, Verdict::Harmless);
        assert!(result.details.is_empty());
        assert_eq!(Verdict::Malicious.to_string(), "malicious");
        assert_eq!("suspicious".parse::<Verdict>().ok(), Some(Verdict::Suspicious));
    }
}
