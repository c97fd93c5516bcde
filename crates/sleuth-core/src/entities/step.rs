use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Finding;
use crate::enums::Significance;
use crate::record::QueryBatch;

/// One executed step of an investigation.
///
/// Step numbers are 1-based and increase monotonically across both the
/// primary hypothesis loop and the upstream-tracing phase. Immutable once
/// appended to the investigation's step list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InvestigationStep {
    pub step_number: usize,
    pub hypothesis: String,
    pub query: String,
    pub summary: String,
    pub findings: Vec<Finding>,
    pub results: QueryBatch,
    pub timestamp: DateTime<Utc>,
}

impl InvestigationStep {
    /// Whether any finding in this step carries high significance.
    #[must_use]
    pub fn has_high_significance_finding(&self) -> bool {
        self.findings.iter().any(|f| f.significance == Significance::High)
    }
}
