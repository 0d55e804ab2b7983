//! Prometheus metrics for the Store and the resource containers.
//!
//! Metrics are emitted through the `metrics` facade and are no-ops until a
//! recorder is installed. [`MetricsRecorder`] installs the Prometheus one and
//! renders the text exposition format on demand.
//!
//! # Example
//!
//! ```rust,no_run
//! use concierge_runtime::metrics::MetricsRecorder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut recorder = MetricsRecorder::new();
//! recorder.install()?;
//!
//! // ... dispatch actions ...
//!
//! if let Some(text) = recorder.render() {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

pub use metrics::{counter, histogram};

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus recorder with an in-process render handle.
#[derive(Default)]
pub struct MetricsRecorder {
    handle: Option<PrometheusHandle>,
}

impl MetricsRecorder {
    /// Create a recorder that is not installed yet
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Describe all metrics and install the Prometheus recorder globally.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError`] if the exporter cannot be built or installed.
    /// A recorder that is already installed (common in tests) is only warned
    /// about; `render` then returns `None`.
    pub fn install(&mut self) -> Result<(), MetricsError> {
        register_metrics();

        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.000_01, 0.000_05, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                self.handle = Some(handle);
                tracing::info!("Prometheus metrics recorder installed");
                Ok(())
            },
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            },
        }
    }

    /// Returns true if this instance owns the installed recorder
    #[must_use]
    pub const fn is_installed(&self) -> bool {
        self.handle.is_some()
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if this instance did not install the recorder.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register all metric descriptions.
fn register_metrics() {
    describe_counter!("store.commands.total", "Total number of actions dispatched to a store");
    describe_histogram!(
        "store.reducer.duration_seconds",
        "Time spent in the reducer for one dispatched action"
    );
    describe_histogram!("store.effects.count", "Number of effects returned by one reducer run");
    describe_counter!("store.effects.spawned", "Total number of effect futures spawned");
    describe_counter!(
        "resource.transitions.total",
        "Resource container transitions, labelled by domain and phase"
    );
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record a dispatched action.
    pub fn record_command() {
        counter!("store.commands.total").increment(1);
    }

    /// Record one reducer run.
    pub fn record_reduce(duration: Duration, effects: usize) {
        histogram!("store.reducer.duration_seconds").record(duration.as_secs_f64());
        #[allow(clippy::cast_precision_loss)] // effect counts are tiny
        histogram!("store.effects.count").record(effects as f64);
    }

    /// Record a spawned effect future.
    pub fn record_effect_spawned() {
        counter!("store.effects.spawned").increment(1);
    }
}
