//! Logging setup for socchat hosts.
//!
//! `init_subscriber` installs a global `tracing` subscriber with an
//! `EnvFilter` (honouring `RUST_LOG`), a formatted log layer, and optionally
//! a [`PipelineEventLayer`] feeding the presentation layer.

pub mod event_layer;

pub use event_layer::{PIPELINE_TARGET, PipelineEvent, PipelineEventLayer};

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber.
///
/// `default_filter` (e.g. `"info,chat_pipeline=debug"`) applies when
/// `RUST_LOG` is unset. When `events` is given, pipeline events are also
/// forwarded to it.
///
/// # Errors
///
/// Fails on an invalid filter directive or if a global subscriber is
/// already installed.
pub fn init_subscriber(
    default_filter: &str,
    events: Option<mpsc::UnboundedSender<PipelineEvent>>,
) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(events.map(PipelineEventLayer::new))
        .try_init()?;

    tracing::debug!("[Telemetry] subscriber installed (default filter: {})", default_filter);
    Ok(())
}
