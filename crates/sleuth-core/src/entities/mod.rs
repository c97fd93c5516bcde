//! Entity structs for all Sleuth domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation. Everything an investigation produces is
//! plain data: no handles, no interior mutability, safe to snapshot to JSONL.

mod confidence;
mod correlation;
mod evidence;
mod finding;
mod hypothesis;
mod incident;
mod intent;
mod root_cause;
mod service;
mod step;

pub use confidence::{ConfidenceFactors, ConfidenceReport, Factor, SupportingEvidence};
pub use correlation::{
    CorrelationBundle, HistoricalMatch, RelatedEvent, TemporalCluster, TransactionEvent,
};
pub use evidence::EvidenceItem;
pub use finding::Finding;
pub use hypothesis::Hypothesis;
pub use incident::{ErrorSignature, Incident};
pub use intent::IntentSummary;
pub use root_cause::{CascadeEdge, RootCause, RootCauseEvidence};
pub use service::{Service, UpstreamDependency};
pub use step::InvestigationStep;
