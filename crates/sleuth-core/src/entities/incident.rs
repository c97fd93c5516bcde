use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::record::LogRecord;

/// A reduced fingerprint of one error event, used for historical matching.
///
/// `service` is the raw index/source name (`"unknown"` when absent), not a
/// catalog-resolved id: two unmapped events from the same index should still
/// match each other.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorSignature {
    pub service: String,
    pub error_keywords: Vec<String>,
    pub error_codes: Vec<String>,
}

/// A past incident held in the memory store.
///
/// `events` backs signature matching; incidents stored from a finished
/// investigation carry no events and participate in retrieval only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Incident {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub events: Vec<LogRecord>,
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
}

impl Incident {
    /// The resolution text to surface on a historical match, falling back to
    /// the stored answer when no explicit resolution was recorded.
    #[must_use]
    pub fn resolution_text(&self) -> &str {
        self.resolution.as_deref().unwrap_or(&self.answer)
    }
}
