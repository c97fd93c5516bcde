use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RootCauseKind;
use crate::ids::ServiceId;

/// One edge of a detected error cascade.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CascadeEdge {
    pub from: ServiceId,
    pub to: ServiceId,
}

/// Kind-specific evidence payload attached to a root cause.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum RootCauseEvidence {
    Cascade {
        cascade_chain: Vec<CascadeEdge>,
        affected_services: Vec<ServiceId>,
    },
    Upstream {
        failure_modes: Vec<String>,
        downstream_affected: ServiceId,
    },
    Earliest {
        timestamp: String,
    },
    Frequent {
        error_count: usize,
        samples: Vec<String>,
    },
}

/// A ranked root cause candidate.
///
/// After ranking, at most one cause per distinct service survives
/// deduplication and the list is truncated to five entries.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RootCause {
    pub description: String,
    pub confidence: f64,
    #[serde(rename = "type")]
    pub kind: RootCauseKind,
    #[serde(default)]
    pub service: Option<ServiceId>,
    pub evidence: RootCauseEvidence,
}
