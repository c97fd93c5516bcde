use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::{ErrorSignature, Incident};
use crate::record::LogRecord;

/// One event inside a transaction group, tagged with its raw index/source
/// name and timestamp text for ordering.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TransactionEvent {
    pub event: LogRecord,
    pub service: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// An event related to a temporal cluster's anchor, with the absolute time
/// distance in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RelatedEvent {
    pub event: LogRecord,
    pub time_diff_seconds: f64,
}

/// An anchor event plus every other event within the correlation window.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TemporalCluster {
    pub anchor_event: LogRecord,
    pub related_events: Vec<RelatedEvent>,
}

/// A current error signature matched against a historical incident.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HistoricalMatch {
    pub signature: ErrorSignature,
    pub incident: Incident,
    pub similarity: f64,
    pub resolution: String,
}

/// Everything the correlation engine produced for one investigation.
///
/// Transaction groups are keyed by correlation id and only kept when they
/// hold more than one event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CorrelationBundle {
    pub transactions: BTreeMap<String, Vec<TransactionEvent>>,
    pub temporal_clusters: Vec<TemporalCluster>,
    pub historical_matches: Vec<HistoricalMatch>,
}

impl CorrelationBundle {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.temporal_clusters.is_empty()
            && self.historical_matches.is_empty()
    }
}
