//! Configuration model for the chat pipeline.
//!
//! Every field has a default so a partial (or missing) `config.toml`
//! still yields a usable configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ioc::Ipv4Policy;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ChatConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Input acceptance settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct InputConfig {
    /// Unclassified input must be strictly longer than this (in characters)
    /// to be accepted as a natural-language question.
    #[serde(default = "default_min_question_len")]
    pub min_question_len: usize,
    #[serde(default)]
    pub ipv4_policy: Ipv4Policy,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            min_question_len: default_min_question_len(),
            ipv4_policy: Ipv4Policy::default(),
        }
    }
}

/// Lookup latency, deadline and retry settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EnrichmentConfig {
    /// Simulated round trip of the demo provider.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Deadline for a single lookup attempt.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Total attempts including the first one. Zero is treated as one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Backoff before the second attempt; doubles on each further attempt.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

impl EnrichmentConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            timeout_ms: default_timeout_ms(),
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

fn default_min_question_len() -> usize {
    8
}

fn default_latency_ms() -> u64 {
    900
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    200
}
