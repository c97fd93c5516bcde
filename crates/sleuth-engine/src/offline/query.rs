//! Snapshot-backed query execution.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use sleuth_catalog::ServiceCatalog;
use sleuth_core::entities::{Hypothesis, IntentSummary};
use sleuth_core::record::{LogRecord, QueryBatch};
use sleuth_core::timeutil::{TimeWindow, parse_timestamp};

use crate::error::CollaboratorError;
use crate::traits::{ExecutedQuery, QueryExecutor};

/// Filters a loaded event snapshot the way a log store would answer a
/// synthesized query.
///
/// Target indexes come from the intent's explicit indexes, the intent
/// services' catalog bindings, and any catalog service named in the
/// hypothesis text (which is how upstream-tracing steps reach their
/// dependency's logs). No target indexes means no index filter. Records
/// with a parseable timestamp must fall inside the window; undated
/// records pass through.
pub struct SnapshotQueryExecutor {
    catalog: Arc<ServiceCatalog>,
    events: Vec<LogRecord>,
}

impl SnapshotQueryExecutor {
    #[must_use]
    pub fn new(catalog: Arc<ServiceCatalog>, events: Vec<LogRecord>) -> Self {
        Self { catalog, events }
    }

    fn target_indexes(&self, hypothesis: &Hypothesis, intent: &IntentSummary) -> BTreeSet<String> {
        let mut targets: BTreeSet<String> =
            intent.indexes.iter().map(|i| i.to_lowercase()).collect();
        for name in &intent.services {
            if let Some(service) = self.catalog.resolve(name) {
                targets.extend(service.indexes.iter().map(|i| i.to_lowercase()));
            }
        }
        let hypothesis_lower = hypothesis.text.to_lowercase();
        for service in self.catalog.services() {
            if hypothesis_lower.contains(&service.id.as_str().to_lowercase()) {
                targets.extend(service.indexes.iter().map(|i| i.to_lowercase()));
            }
        }
        targets
    }
}

#[async_trait]
impl QueryExecutor for SnapshotQueryExecutor {
    async fn run(
        &self,
        hypothesis: &Hypothesis,
        _question: &str,
        window: TimeWindow,
        intent: &IntentSummary,
    ) -> Result<ExecutedQuery, CollaboratorError> {
        let targets = self.target_indexes(hypothesis, intent);

        let records: Vec<LogRecord> = self
            .events
            .iter()
            .filter(|record| {
                if !targets.is_empty() {
                    match record.source_index() {
                        Some(index) if targets.contains(&index.to_lowercase()) => {}
                        _ => return false,
                    }
                }
                match record.timestamp_text().as_deref().and_then(parse_timestamp) {
                    Some(t) => window.contains(t),
                    None => true,
                }
            })
            .cloned()
            .collect();

        let mut fields: Vec<String> = Vec::new();
        for record in &records {
            for key in record.fields.keys() {
                if !fields.contains(key) {
                    fields.push(key.clone());
                }
            }
        }

        let index_clause = if targets.is_empty() {
            "index=*".to_string()
        } else {
            targets
                .iter()
                .map(|t| format!("index={t}"))
                .collect::<Vec<_>>()
                .join(" OR ")
        };
        let query = format!(
            "search {index_clause} earliest={} latest={}",
            window.start.to_rfc3339(),
            window.end.to_rfc3339()
        );

        let total_count = records.len();
        Ok(ExecutedQuery { query, batch: QueryBatch { records, total_count, fields } })
    }
}
