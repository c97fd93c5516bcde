use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FindingType, Significance};
use crate::ids::ServiceId;

/// One piece of evidence backing the investigation's conclusion.
///
/// Derived either from a [`Finding`](crate::entities::Finding) (relevance
/// 0.9 for high significance, 0.7 for medium) or from a raw error sample
/// (relevance 0.75). The evidence list for an investigation is sorted by
/// descending relevance, ties keeping input order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EvidenceItem {
    pub source: String,
    pub content: String,
    pub relevance: f64,
    pub significance: Significance,
    pub matches_intent: bool,
    pub step_number: usize,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub service: Option<ServiceId>,
    #[serde(default)]
    pub finding_type: Option<FindingType>,
}
