use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Significance;

/// A statistically notable field/value pattern extracted from one query's
/// results. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Finding {
    pub field: String,
    pub value: String,
    pub count: usize,
    pub significance: Significance,
    pub matches_intent: bool,
}
