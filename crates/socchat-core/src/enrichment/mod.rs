//! Threat-intelligence enrichment.
//!
//! # Module Structure
//!
//! - `model`: verdicts and result details (`Verdict`, `EnrichmentResult`)
//! - `provider`: the provider seam and injectable delays
//! - `demo`: canned VirusTotal-style provider with simulated latency
//! - `service`: timeout and bounded retry around a provider
//! - `formatter`: renders results as assistant annotations

mod demo;
mod formatter;
mod model;
mod provider;
mod service;

pub use demo::DemoThreatIntel;
pub use formatter::{ScanSubject, format_unavailable, format_verdict};
pub use model::{EnrichmentResult, Verdict};
pub use provider::{Delay, EnrichmentProvider, NoDelay, TokioDelay};
pub use service::EnrichmentService;
