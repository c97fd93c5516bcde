//! Collaborator seams.
//!
//! Everything the core does not own -- natural-language intent extraction,
//! hypothesis generation, query synthesis and execution, incident memory,
//! answer synthesis -- sits behind one of these traits. Implementations may
//! call external services; the orchestrator wraps every call in a timeout
//! and degrades on failure, so a trait implementation is free to just
//! propagate its errors.

use async_trait::async_trait;

use sleuth_core::entities::{
    ConfidenceReport, CorrelationBundle, EvidenceItem, Hypothesis, Incident, IntentSummary,
    InvestigationStep, RootCause,
};
use sleuth_core::record::QueryBatch;
use sleuth_core::timeutil::TimeWindow;

use crate::error::CollaboratorError;

/// A synthesized and executed query: the query text that ran and the
/// records the store returned.
#[derive(Debug, Clone, Default)]
pub struct ExecutedQuery {
    pub query: String,
    pub batch: QueryBatch,
}

impl ExecutedQuery {
    /// The degraded substitute for a failed execution: empty query text,
    /// zero results.
    #[must_use]
    pub fn degraded() -> Self {
        Self::default()
    }
}

/// Everything the answer synthesizer gets to see.
#[derive(Debug, Clone, Copy)]
pub struct AnswerContext<'a> {
    pub question: &'a str,
    pub evidence: &'a [EvidenceItem],
    pub steps: &'a [InvestigationStep],
    pub confidence: &'a ConfidenceReport,
    pub root_causes: &'a [RootCause],
    pub correlations: Option<&'a CorrelationBundle>,
}

/// Extracts structured intent from the user's question.
///
/// The returned summary is expected to be pre-validated against the
/// catalog; the orchestrator does not re-validate it.
#[async_trait]
pub trait IntentExtractor: Send + Sync {
    async fn extract(&self, question: &str) -> Result<IntentSummary, CollaboratorError>;
}

/// Generates an ordered list of hypotheses to investigate.
#[async_trait]
pub trait HypothesisGenerator: Send + Sync {
    async fn generate(
        &self,
        question: &str,
        intent: &IntentSummary,
        history: &[Incident],
    ) -> Result<Vec<Hypothesis>, CollaboratorError>;
}

/// Synthesizes a log-store query for a hypothesis and executes it.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn run(
        &self,
        hypothesis: &Hypothesis,
        question: &str,
        window: TimeWindow,
        intent: &IntentSummary,
    ) -> Result<ExecutedQuery, CollaboratorError>;
}

/// Stores finished investigations and retrieves similar past incidents.
#[async_trait]
pub trait IncidentMemory: Send + Sync {
    async fn retrieve_similar(
        &self,
        question: &str,
        window: TimeWindow,
    ) -> Result<Vec<Incident>, CollaboratorError>;

    async fn store(&self, incident: Incident) -> Result<(), CollaboratorError>;
}

/// Turns the finished analysis into a natural-language answer.
#[async_trait]
pub trait AnswerSynthesizer: Send + Sync {
    async fn synthesize(&self, context: &AnswerContext<'_>) -> Result<String, CollaboratorError>;
}
