//! Deterministic in-process collaborators.
//!
//! These drive the engine end-to-end without any external service: the
//! intent extractor matches catalog names in the question, the hypothesis
//! generator fills templates, the query executor filters a loaded event
//! snapshot, the incident memory is an in-process vector, and the answer
//! synthesizer is the fallback template. The CLI and the integration
//! tests wire these; a deployment would swap in service-backed
//! implementations of the same traits.

mod answer;
mod hypotheses;
mod intent;
mod memory;
mod query;

pub use answer::TemplateAnswerSynthesizer;
pub use hypotheses::TemplateHypothesisGenerator;
pub use intent::KeywordIntentExtractor;
pub use memory::InMemoryIncidentMemory;
pub use query::SnapshotQueryExecutor;

/// Wire the full offline collaborator set over one catalog and event
/// snapshot.
#[must_use]
pub fn collaborators(
    catalog: std::sync::Arc<sleuth_catalog::ServiceCatalog>,
    events: Vec<sleuth_core::record::LogRecord>,
    incidents: Vec<sleuth_core::entities::Incident>,
) -> crate::Collaborators {
    use std::sync::Arc;
    crate::Collaborators {
        intent: Arc::new(KeywordIntentExtractor::new(Arc::clone(&catalog))),
        hypotheses: Arc::new(TemplateHypothesisGenerator),
        executor: Arc::new(SnapshotQueryExecutor::new(catalog, events)),
        memory: Arc::new(InMemoryIncidentMemory::new(incidents)),
        answers: Arc::new(TemplateAnswerSynthesizer),
    }
}
