//! Response types returned as JSON by `slth` commands.
//!
//! These structs define the shape of JSON output for commands like
//! `slth investigate`, `slth catalog list`, and `slth catalog show`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    ConfidenceReport, CorrelationBundle, EvidenceItem, InvestigationStep, RootCause, Service,
};
use crate::ids::ServiceId;

/// The full result of one `investigate` call.
///
/// When `requires_user_input` is set, the question could not be scoped to
/// any catalog service and `answer` carries guidance instead of a
/// conclusion; every analytic field is empty in that case.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InvestigationOutcome {
    pub answer: String,
    pub confidence: ConfidenceReport,
    pub evidence: Vec<EvidenceItem>,
    pub steps: Vec<InvestigationStep>,
    pub root_causes: Vec<RootCause>,
    pub correlations: CorrelationBundle,
    pub requires_user_input: bool,
    pub available_services: Vec<ServiceId>,
    pub processing_time_ms: f64,
    pub timestamp: DateTime<Utc>,
}

/// Response from `slth catalog list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CatalogListResponse {
    pub services: Vec<Service>,
    pub total: usize,
}

/// Response from `slth catalog show`: one service with its derived
/// relationships.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ServiceDetails {
    pub service: Service,
    pub downstream: Vec<ServiceId>,
    pub upstream_chain: Vec<ServiceId>,
    pub downstream_chain: Vec<ServiceId>,
}
