use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A natural-language guess about a possible cause, paired with a priority
/// used to order investigation (1 = highest).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Hypothesis {
    pub text: String,
    pub priority: u32,
    #[serde(default)]
    pub query_template: Option<String>,
}

impl Hypothesis {
    #[must_use]
    pub fn new(text: impl Into<String>, priority: u32) -> Self {
        Self { text: text.into(), priority, query_template: None }
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.query_template = Some(template.into());
        self
    }
}
