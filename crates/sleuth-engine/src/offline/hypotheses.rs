//! Template hypothesis generation.

use async_trait::async_trait;

use sleuth_core::entities::{Hypothesis, Incident, IntentSummary};

use crate::error::CollaboratorError;
use crate::fallback;
use crate::traits::HypothesisGenerator;

/// Deterministic hypothesis generation from intent templates.
///
/// One recurrence hypothesis when history exists, an error-scan and an
/// upstream-check hypothesis per intent service, then the generic pair as
/// a tail so the loop never starves.
pub struct TemplateHypothesisGenerator;

#[async_trait]
impl HypothesisGenerator for TemplateHypothesisGenerator {
    async fn generate(
        &self,
        _question: &str,
        intent: &IntentSummary,
        history: &[Incident],
    ) -> Result<Vec<Hypothesis>, CollaboratorError> {
        let mut hypotheses = Vec::new();
        if !history.is_empty() {
            hypotheses.push(Hypothesis::new(
                "The current symptom is a recurrence of a previously investigated incident",
                1,
            ));
        }
        for service in &intent.services {
            hypotheses.push(Hypothesis::new(
                format!("Errors in the {service} logs explain the reported symptom"),
                2,
            ));
            hypotheses.push(Hypothesis::new(
                format!("An upstream dependency of {service} is degraded"),
                3,
            ));
        }
        for generic in fallback::generic_hypotheses() {
            hypotheses.push(Hypothesis::new(generic.text, generic.priority + 3));
        }
        Ok(hypotheses)
    }
}
