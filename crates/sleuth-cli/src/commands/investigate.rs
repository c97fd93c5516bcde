//! `slth investigate` -- run one offline investigation.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;

use sleuth_config::SleuthConfig;
use sleuth_core::entities::Incident;
use sleuth_core::record::LogRecord;
use sleuth_core::timeutil::parse_time_window;
use sleuth_engine::{EngineSettings, Investigator, offline};

use crate::cli::{GlobalFlags, InvestigateArgs};
use crate::commands::load_catalog;
use crate::output::output;

pub async fn handle(
    args: &InvestigateArgs,
    flags: &GlobalFlags,
    config: &SleuthConfig,
) -> anyhow::Result<()> {
    let catalog = Arc::new(load_catalog(flags, config)?);

    let events: Vec<LogRecord> = read_jsonl(&args.events)
        .with_context(|| format!("failed to read events from {}", args.events.display()))?;
    let incidents: Vec<Incident> = match &args.memory {
        Some(path) => read_jsonl(path)
            .with_context(|| format!("failed to read incidents from {}", path.display()))?,
        None => Vec::new(),
    };
    tracing::debug!(events = events.len(), incidents = incidents.len(), "loaded snapshot");

    let window_spec = args.window.as_deref().unwrap_or(&config.general.default_time_window);
    let window = parse_time_window(Some(window_spec), Utc::now());

    let collaborators = offline::collaborators(Arc::clone(&catalog), events, incidents);
    let investigator = Investigator::new(catalog, collaborators, settings_from(config));

    let outcome = investigator.investigate(&args.question, window).await;
    output(&outcome, flags.format)
}

fn settings_from(config: &SleuthConfig) -> EngineSettings {
    let engine = &config.engine;
    EngineSettings {
        collaborator_timeout: Duration::from_secs(engine.collaborator_timeout_secs),
        temporal_window_secs: engine.temporal_window_secs,
        historical_similarity_threshold: engine.historical_similarity_threshold,
        max_temporal_clusters: engine.max_temporal_clusters,
        max_historical_matches: engine.max_historical_matches,
        upstream_trace_limit: engine.upstream_trace_limit,
    }
}

fn read_jsonl<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    serde_jsonlines::json_lines(path)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(anyhow::Error::from)
}
