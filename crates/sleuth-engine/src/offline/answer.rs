//! Template answer synthesis.

use async_trait::async_trait;

use crate::error::CollaboratorError;
use crate::fallback;
use crate::traits::{AnswerContext, AnswerSynthesizer};

/// Answers with the deterministic fallback template. Useful offline and
/// as the degradation target when a model-backed synthesizer fails.
pub struct TemplateAnswerSynthesizer;

#[async_trait]
impl AnswerSynthesizer for TemplateAnswerSynthesizer {
    async fn synthesize(&self, context: &AnswerContext<'_>) -> Result<String, CollaboratorError> {
        Ok(fallback::template_answer(context))
    }
}
