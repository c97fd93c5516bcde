//! Investigation engine tuning knobs.

use serde::{Deserialize, Serialize};

const fn default_collaborator_timeout_secs() -> u64 {
    30
}

const fn default_temporal_window_secs() -> f64 {
    300.0
}

const fn default_historical_threshold() -> f64 {
    0.5
}

const fn default_max_temporal_clusters() -> usize {
    10
}

const fn default_max_historical_matches() -> usize {
    5
}

const fn default_upstream_trace_limit() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Per-call timeout for collaborator calls (hypothesis generation,
    /// query execution, answer synthesis, memory access), in seconds.
    #[serde(default = "default_collaborator_timeout_secs")]
    pub collaborator_timeout_secs: u64,

    /// Temporal correlation window, in seconds.
    #[serde(default = "default_temporal_window_secs")]
    pub temporal_window_secs: f64,

    /// Minimum similarity for a historical match to be kept.
    #[serde(default = "default_historical_threshold")]
    pub historical_similarity_threshold: f64,

    /// Cap on reported temporal clusters.
    #[serde(default = "default_max_temporal_clusters")]
    pub max_temporal_clusters: usize,

    /// Cap on reported historical matches.
    #[serde(default = "default_max_historical_matches")]
    pub max_historical_matches: usize,

    /// Cap on extra steps issued during upstream tracing.
    #[serde(default = "default_upstream_trace_limit")]
    pub upstream_trace_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            collaborator_timeout_secs: default_collaborator_timeout_secs(),
            temporal_window_secs: default_temporal_window_secs(),
            historical_similarity_threshold: default_historical_threshold(),
            max_temporal_clusters: default_max_temporal_clusters(),
            max_historical_matches: default_max_historical_matches(),
            upstream_trace_limit: default_upstream_trace_limit(),
        }
    }
}
