//! Enrichment service: deadline and bounded retry around a provider.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::model::EnrichmentResult;
use super::provider::{Delay, EnrichmentProvider, TokioDelay};
use crate::config::EnrichmentConfig;
use crate::error::{ChatError, Result};
use crate::ioc::IndicatorKind;

/// Wraps an [`EnrichmentProvider`] with a per-attempt timeout and
/// exponential backoff for transient failures.
///
/// A lookup either resolves or fails after at most `max_attempts` attempts,
/// so callers are never left waiting indefinitely.
#[derive(Clone)]
pub struct EnrichmentService {
    provider: Arc<dyn EnrichmentProvider>,
    backoff_delay: Arc<dyn Delay>,
    timeout: Duration,
    max_attempts: u32,
    initial_backoff: Duration,
}

impl EnrichmentService {
    /// Creates a service with settings from `config`, backing off on the
    /// tokio timer.
    pub fn new(provider: Arc<dyn EnrichmentProvider>, config: &EnrichmentConfig) -> Self {
        Self {
            provider,
            backoff_delay: Arc::new(TokioDelay),
            timeout: config.timeout(),
            max_attempts: config.max_attempts.max(1),
            initial_backoff: config.initial_backoff(),
        }
    }

    /// Overrides the delay used between attempts.
    pub fn with_backoff_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.backoff_delay = delay;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Looks up `value` as `kind`.
    ///
    /// # Errors
    ///
    /// Returns the last error once attempts are exhausted, or the first
    /// non-retryable error immediately.
    pub async fn enrich(&self, value: &str, kind: IndicatorKind) -> Result<EnrichmentResult> {
        let mut backoff = self.initial_backoff;
        let mut attempt = 1;

        loop {
            let started = Instant::now();
            let outcome = match tokio::time::timeout(self.timeout, self.provider.lookup(value, kind))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(ChatError::Timeout {
                    elapsed_ms: started.elapsed().as_millis() as u64,
                }),
            };

            match outcome {
                Ok(result) => {
                    tracing::debug!(
                        target: "chat_pipeline",
                        "[EnrichmentService] {} resolved {} as {} on attempt {}",
                        self.provider.name(),
                        kind,
                        result.verdict,
                        attempt
                    );
                    return Ok(result);
                }
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    tracing::warn!(
                        target: "chat_pipeline",
                        "[EnrichmentService] attempt {}/{} failed: {}; retrying in {}ms",
                        attempt,
                        self.max_attempts,
                        err,
                        backoff.as_millis()
                    );
                    self.backoff_delay.wait(backoff).await;
                    backoff = backoff.saturating_mul(2);
                    attempt += 1;
                }
                Err(err) => {
                    tracing::warn!(
                        target: "chat_pipeline",
                        "[EnrichmentService] giving up on {} after {} attempt(s): {}",
                        kind,
                        attempt,
                        err
                    );
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::model::Verdict;
    use crate::enrichment::provider::NoDelay;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails with the queued errors, then succeeds.
    struct ScriptedProvider {
        failures: Mutex<Vec<ChatError>>,
        calls: AtomicU32,
    }

    impl ScriptedProvider {
        fn new(failures: Vec<ChatError>) -> Self {
            Self {
                failures: Mutex::new(failures),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl EnrichmentProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn lookup(&self, _value: &str, _kind: IndicatorKind) -> Result<EnrichmentResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut failures = self.failures.lock().unwrap();
            if failures.is_empty() {
                Ok(EnrichmentResult::new(Verdict::Harmless))
            } else {
                Err(failures.remove(0))
            }
        }
    }

    struct HangingProvider;

    #[async_trait]
    impl EnrichmentProvider for HangingProvider {
        fn name(&self) -> &str {
            "hanging"
        }

        async fn lookup(&self, _value: &str, _kind: IndicatorKind) -> Result<EnrichmentResult> {
            std::future::pending().await
        }
    }

    #[derive(Default)]
    struct RecordingDelay {
        waits: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Delay for RecordingDelay {
        async fn wait(&self, duration: Duration) {
            self.waits.lock().unwrap().push(duration);
        }
    }

    fn config(max_attempts: u32) -> EnrichmentConfig {
        EnrichmentConfig {
            latency_ms: 0,
            timeout_ms: 50,
            max_attempts,
            initial_backoff_ms: 100,
        }
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried_with_doubling_backoff() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            ChatError::transient("ip", "503"),
            ChatError::transient("ip", "503"),
        ]));
        let delay = Arc::new(RecordingDelay::default());
        let service = EnrichmentService::new(provider.clone(), &config(3))
            .with_backoff_delay(delay.clone());

        let result = service.enrich("1.1.1.1", IndicatorKind::Ip).await.unwrap();

        assert_eq!(result.verdict, Verdict::Harmless);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            *delay.waits.lock().unwrap(),
            vec![Duration::from_millis(100), Duration::from_millis(200)]
        );
    }

    #[tokio::test]
    async fn test_attempts_are_bounded() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            ChatError::transient("hash", "reset"),
            ChatError::transient("hash", "reset"),
            ChatError::transient("hash", "reset"),
        ]));
        let service =
            EnrichmentService::new(provider.clone(), &config(2)).with_backoff_delay(Arc::new(NoDelay));

        let err = service
            .enrich("d41d8cd98f00b204e9800998ecf8427e", IndicatorKind::Hash)
            .await
            .unwrap_err();

        assert!(err.is_enrichment());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_terminal_failure_is_not_retried() {
        let provider = Arc::new(ScriptedProvider::new(vec![ChatError::terminal(
            "url",
            "invalid api key",
        )]));
        let service =
            EnrichmentService::new(provider.clone(), &config(5)).with_backoff_delay(Arc::new(NoDelay));

        let err = service
            .enrich("https://example.com", IndicatorKind::Url)
            .await
            .unwrap_err();

        assert_eq!(err, ChatError::terminal("url", "invalid api key"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hanging_provider_times_out() {
        let service = EnrichmentService::new(Arc::new(HangingProvider), &config(2))
            .with_backoff_delay(Arc::new(NoDelay));

        let err = service.enrich("1.1.1.1", IndicatorKind::Ip).await.unwrap_err();

        assert!(matches!(err, ChatError::Timeout { .. }));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let service = EnrichmentService::new(Arc::new(HangingProvider), &config(0));
        assert_eq!(service.max_attempts, 1);
        assert_eq!(service.provider_name(), "hanging");
    }
}
