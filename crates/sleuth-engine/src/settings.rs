//! Engine tuning knobs.

use std::time::Duration;

/// Runtime settings for one [`Investigator`](crate::Investigator).
///
/// Plain values, not a config source: the CLI maps its layered
/// `sleuth-config` sections onto this struct, tests construct it directly.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Upper bound on any single collaborator call.
    pub collaborator_timeout: Duration,
    /// Temporal correlation window in seconds.
    pub temporal_window_secs: f64,
    /// Minimum similarity for a historical match to be kept.
    pub historical_similarity_threshold: f64,
    /// Cap on reported temporal clusters.
    pub max_temporal_clusters: usize,
    /// Cap on reported historical matches.
    pub max_historical_matches: usize,
    /// Cap on extra steps issued during upstream tracing.
    pub upstream_trace_limit: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            collaborator_timeout: Duration::from_secs(30),
            temporal_window_secs: 300.0,
            historical_similarity_threshold: 0.5,
            max_temporal_clusters: 10,
            max_historical_matches: 5,
            upstream_trace_limit: 5,
        }
    }
}
