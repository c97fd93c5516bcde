//! Catalog-grounded keyword intent extraction.

use std::sync::Arc;

use async_trait::async_trait;

use sleuth_catalog::ServiceCatalog;
use sleuth_core::entities::IntentSummary;

use crate::error::CollaboratorError;
use crate::traits::IntentExtractor;

/// Symptom vocabulary recognized in questions.
const SYMPTOM_KEYWORDS: [&str; 12] = [
    "timeout",
    "error",
    "failure",
    "failing",
    "slow",
    "latency",
    "down",
    "outage",
    "crash",
    "exception",
    "5xx",
    "unavailable",
];

/// Markers that ask for the origin of a problem rather than its current
/// shape.
const ORIGIN_MARKERS: [&str; 3] = ["origin", "first occurrence", "earliest"];

/// Extracts intent by substring-matching catalog names and a fixed
/// symptom lexicon against the lowercased question.
///
/// Matched service ids double as entities, so downstream consumers (the
/// origin boost, pattern significance) see them without a separate
/// entity-recognition pass.
pub struct KeywordIntentExtractor {
    catalog: Arc<ServiceCatalog>,
}

impl KeywordIntentExtractor {
    #[must_use]
    pub fn new(catalog: Arc<ServiceCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl IntentExtractor for KeywordIntentExtractor {
    async fn extract(&self, question: &str) -> Result<IntentSummary, CollaboratorError> {
        let lowered = question.to_lowercase();

        let mut services = Vec::new();
        let mut indexes = Vec::new();
        let mut apps = Vec::new();
        for service in self.catalog.services() {
            if lowered.contains(&service.id.as_str().to_lowercase()) {
                services.push(service.id.as_str().to_string());
            }
            for index in &service.indexes {
                if lowered.contains(&index.to_lowercase()) && !indexes.contains(index) {
                    indexes.push(index.clone());
                }
            }
            for app in &service.apps {
                if lowered.contains(&app.to_lowercase()) && !apps.contains(app) {
                    apps.push(app.clone());
                }
            }
        }

        let symptom_keywords: Vec<String> = SYMPTOM_KEYWORDS
            .iter()
            .filter(|kw| lowered.contains(**kw))
            .map(|kw| (*kw).to_string())
            .collect();

        let query_patterns = if ORIGIN_MARKERS.iter().any(|m| lowered.contains(m)) {
            vec!["origin".to_string(), "first_occurrence".to_string()]
        } else {
            Vec::new()
        };

        let entities = services.clone();
        Ok(IntentSummary { services, indexes, apps, entities, symptom_keywords, query_patterns })
    }
}
