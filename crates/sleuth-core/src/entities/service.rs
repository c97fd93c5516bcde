use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Criticality;
use crate::ids::ServiceId;

/// One declared upstream dependency edge, with the failure modes the owning
/// service expects to see when this dependency degrades.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UpstreamDependency {
    pub service: ServiceId,
    #[serde(default)]
    pub failure_modes: Vec<String>,
}

/// A service as declared in the dependency catalog.
///
/// Only upstream edges are stored; downstream relationships are derived by
/// scanning every service's upstream list. The catalog is loaded once and
/// immutable for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Service {
    pub id: ServiceId,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub criticality: Criticality,
    #[serde(default)]
    pub upstream: Vec<UpstreamDependency>,
    #[serde(default)]
    pub indexes: Vec<String>,
    #[serde(default)]
    pub apps: Vec<String>,
}
