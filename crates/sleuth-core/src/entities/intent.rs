use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What the intent extractor pulled out of the user's question.
///
/// All lists are free-form strings as extracted; the engine resolves them
/// against the catalog. An empty summary means the question could not be
/// scoped to anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IntentSummary {
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub indexes: Vec<String>,
    #[serde(default)]
    pub apps: Vec<String>,
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub symptom_keywords: Vec<String>,
    #[serde(default)]
    pub query_patterns: Vec<String>,
}

impl IntentSummary {
    /// True when nothing usable was extracted: no services, indexes, or
    /// entities to scope the investigation with.
    #[must_use]
    pub fn is_unscoped(&self) -> bool {
        self.services.is_empty() && self.indexes.is_empty() && self.entities.is_empty()
    }
}
