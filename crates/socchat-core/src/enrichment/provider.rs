//! Threat-intelligence provider seam.

use std::time::Duration;

use async_trait::async_trait;

use super::model::EnrichmentResult;
use crate::error::Result;
use crate::ioc::IndicatorKind;

/// A source of verdicts for indicators.
///
/// The demo implementation returns canned profiles; a real implementation
/// performs the outbound lookup. Failures should be reported with
/// [`ChatError::transient`](crate::ChatError::transient) when a retry may
/// help and [`ChatError::terminal`](crate::ChatError::terminal) otherwise.
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Looks up `value`, which has already been classified as `kind`.
    async fn lookup(&self, value: &str, kind: IndicatorKind) -> Result<EnrichmentResult>;
}

/// Suspension used for simulated latency and retry backoff.
///
/// Injected so tests can skip real waiting.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately after yielding once to the scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}
