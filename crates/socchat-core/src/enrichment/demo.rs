//! Canned VirusTotal-style provider used by the demo dashboard.
//!
//! Each indicator kind maps to one fixed profile. The provider waits for the
//! configured latency first so the composing indicator has something to show.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::model::{EnrichmentResult, Verdict};
use super::provider::{Delay, EnrichmentProvider, TokioDelay};
use crate::config::EnrichmentConfig;
use crate::error::Result;
use crate::ioc::IndicatorKind;

const PROVIDER_NAME: &str = "virustotal-demo";

/// Demo threat-intelligence provider with simulated latency.
#[derive(Clone)]
pub struct DemoThreatIntel {
    latency: Duration,
    delay: Arc<dyn Delay>,
}

impl DemoThreatIntel {
    pub fn new(latency: Duration, delay: Arc<dyn Delay>) -> Self {
        Self { latency, delay }
    }

    /// Uses the configured latency on the tokio timer.
    pub fn from_config(config: &EnrichmentConfig) -> Self {
        Self::new(config.latency(), Arc::new(TokioDelay))
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    fn profile(kind: IndicatorKind) -> EnrichmentResult {
        match kind {
            IndicatorKind::Ip => EnrichmentResult::new(Verdict::Malicious)
                .with_detail("sources", json!(["AbuseIPDB", "Spamhaus"]))
                .with_detail(
                    "last_analysis_stats",
                    json!({"malicious": 2, "harmless": 8, "suspicious": 1}),
                )
                .with_detail("country", "US"),
            IndicatorKind::Url => EnrichmentResult::new(Verdict::Suspicious)
                .with_detail("sources", json!(["Google Safebrowsing", "PhishTank"]))
                .with_detail(
                    "last_analysis_stats",
                    json!({"malicious": 1, "harmless": 9, "suspicious": 2}),
                )
                .with_detail("content_type", "text/html"),
            IndicatorKind::Hash => EnrichmentResult::new(Verdict::Malicious)
                .with_detail("sources", json!(["ESET", "Avira", "Kaspersky"]))
                .with_detail(
                    "last_analysis_stats",
                    json!({"malicious": 11, "harmless": 41, "suspicious": 1}),
                )
                .with_detail("file_type", "exe"),
        }
    }
}

impl Default for DemoThreatIntel {
    fn default() -> Self {
        Self::from_config(&EnrichmentConfig::default())
    }
}

#[async_trait]
impl EnrichmentProvider for DemoThreatIntel {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn lookup(&self, value: &str, kind: IndicatorKind) -> Result<EnrichmentResult> {
        tracing::debug!(
            "[DemoThreatIntel] lookup kind={} value={} latency_ms={}",
            kind,
            value,
            self.latency.as_millis()
        );
        self.delay.wait(self.latency).await;
        Ok(Self::profile(kind))
    }
}
