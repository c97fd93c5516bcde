//! End-to-end investigations over the offline collaborators.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;

use sleuth_core::entities::{Hypothesis, IntentSummary};
use sleuth_core::enums::{ConfidenceLevel, RootCauseKind};
use sleuth_core::ids::ServiceId;
use sleuth_core::record::{LogRecord, QueryBatch};
use sleuth_core::timeutil::TimeWindow;
use sleuth_engine::offline::{
    InMemoryIncidentMemory, KeywordIntentExtractor, SnapshotQueryExecutor,
    TemplateAnswerSynthesizer, TemplateHypothesisGenerator,
};
use sleuth_engine::traits::{ExecutedQuery, IncidentMemory, QueryExecutor};
use sleuth_engine::{Collaborators, CollaboratorError, EngineSettings, Investigator};

use common::{cascade_events, catalog, event, window};

fn investigator() -> (Investigator, Arc<InMemoryIncidentMemory>) {
    investigator_over(cascade_events())
}

fn investigator_over(events: Vec<LogRecord>) -> (Investigator, Arc<InMemoryIncidentMemory>) {
    let catalog = catalog();
    let memory = Arc::new(InMemoryIncidentMemory::new(Vec::new()));
    let collaborators = Collaborators {
        intent: Arc::new(KeywordIntentExtractor::new(Arc::clone(&catalog))),
        hypotheses: Arc::new(TemplateHypothesisGenerator),
        executor: Arc::new(SnapshotQueryExecutor::new(Arc::clone(&catalog), events)),
        memory: Arc::clone(&memory) as Arc<dyn IncidentMemory>,
        answers: Arc::new(TemplateAnswerSynthesizer),
    };
    (Investigator::new(catalog, collaborators, EngineSettings::default()), memory)
}

#[tokio::test]
async fn cascade_is_detected_end_to_end() {
    let (investigator, _memory) = investigator();
    let outcome = investigator
        .investigate("Why is checkout failing with timeout errors?", window())
        .await;

    assert!(!outcome.requires_user_input);
    assert!(!outcome.root_causes.is_empty());

    let top = &outcome.root_causes[0];
    assert_eq!(top.kind, RootCauseKind::CascadeOrigin);
    assert_eq!(top.service, Some(ServiceId::new("payments")));
    assert!((top.confidence - 0.9).abs() < f64::EPSILON);
}

#[tokio::test]
async fn sufficient_evidence_stops_the_loop_and_tracing_continues_numbering() {
    let (investigator, _memory) = investigator();
    let outcome = investigator
        .investigate("Why is checkout failing with timeout errors?", window())
        .await;

    // The first checkout-scoped hypothesis already returns several
    // findings, so the primary loop stops after one step; the single
    // traced upstream dependency (payments; search has no indexes)
    // continues the numbering.
    assert_eq!(outcome.steps.len(), 2);
    assert_eq!(outcome.steps[0].step_number, 1);
    assert_eq!(outcome.steps[1].step_number, 2);
    assert!(outcome.steps[1].hypothesis.contains("Upstream dependency payments"));
    assert!(outcome.steps[1].hypothesis.contains("timeout, 5xx"));
    assert!(outcome.steps[1].results.total_count > 0);
}

#[tokio::test]
async fn correlations_span_both_services() {
    let (investigator, _memory) = investigator();
    let outcome = investigator
        .investigate("Why is checkout failing with timeout errors?", window())
        .await;

    let group = outcome
        .correlations
        .transactions
        .get("tx-42")
        .expect("transaction group for tx-42");
    assert_eq!(group.len(), 2);
    assert!(!outcome.correlations.temporal_clusters.is_empty());
    assert!(outcome.correlations.historical_matches.is_empty());
}

#[tokio::test]
async fn singleton_transaction_groups_stay_out_of_the_bundle() {
    let mut events = cascade_events();
    events.push(event(
        "checkout_app",
        "2026-01-09T10:00:50Z",
        "error",
        "ERROR inventory sync failed transactionId=tx-solo",
    ));
    let (investigator, _memory) = investigator_over(events);
    let outcome = investigator
        .investigate("Why is checkout failing with timeout errors?", window())
        .await;

    // The checkout index is queried by both the primary step and the
    // upstream trace, so the lone tx-solo event comes back twice. It must
    // still count as one event and be dropped as a singleton group.
    assert!(!outcome.correlations.transactions.contains_key("tx-solo"));
    assert_eq!(outcome.correlations.transactions.get("tx-42").map(Vec::len), Some(2));
}

/// Returns records carrying only the internal payload fields, so pattern
/// extraction finds nothing while correlation still has events to work on.
struct OpaqueSnapshotExecutor;

#[async_trait]
impl QueryExecutor for OpaqueSnapshotExecutor {
    async fn run(
        &self,
        _hypothesis: &Hypothesis,
        _question: &str,
        _window: TimeWindow,
        _intent: &IntentSummary,
    ) -> Result<ExecutedQuery, CollaboratorError> {
        let mut first = LogRecord::new();
        first
            .insert("_time", json!("2026-01-09T10:00:00Z"))
            .insert("_raw", json!("opaque payload transactionId=tx-9"));
        let mut second = LogRecord::new();
        second
            .insert("_time", json!("2026-01-09T10:00:20Z"))
            .insert("_raw", json!("opaque payload transactionId=tx-9"));
        Ok(ExecutedQuery {
            query: "search index=checkout_app".to_string(),
            batch: QueryBatch::new(vec![first, second]),
        })
    }
}

#[tokio::test]
async fn correlation_runs_even_when_steps_yield_no_findings() {
    let catalog = catalog();
    let collaborators = Collaborators {
        intent: Arc::new(KeywordIntentExtractor::new(Arc::clone(&catalog))),
        hypotheses: Arc::new(TemplateHypothesisGenerator),
        executor: Arc::new(OpaqueSnapshotExecutor),
        memory: Arc::new(InMemoryIncidentMemory::new(Vec::new())),
        answers: Arc::new(TemplateAnswerSynthesizer),
    };
    let investigator = Investigator::new(catalog, collaborators, EngineSettings::default());
    let outcome = investigator
        .investigate("Why is checkout failing with timeout errors?", window())
        .await;

    assert!(outcome.steps.iter().all(|s| s.findings.is_empty()));
    let group = outcome
        .correlations
        .transactions
        .get("tx-9")
        .expect("transaction group for tx-9");
    assert_eq!(group.len(), 2);
    assert!(!outcome.correlations.temporal_clusters.is_empty());
    assert!(outcome.correlations.historical_matches.is_empty());
}

#[tokio::test]
async fn confidence_is_scored_and_in_range() {
    let (investigator, _memory) = investigator();
    let outcome = investigator
        .investigate("Why is checkout failing with timeout errors?", window())
        .await;

    assert!(outcome.confidence.score >= 0.0 && outcome.confidence.score <= 1.0);
    assert_eq!(outcome.confidence.level, ConfidenceLevel::from_score(outcome.confidence.score));
    assert!(!outcome.evidence.is_empty());
    assert!(!outcome.confidence.reasoning.is_empty());
}

#[tokio::test]
async fn finished_investigations_are_stored() {
    let (investigator, memory) = investigator();
    assert!(memory.incidents().is_empty());
    let outcome = investigator
        .investigate("Why is checkout failing with timeout errors?", window())
        .await;

    let stored = memory.incidents();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].answer, outcome.answer);
    assert!(stored[0].id.starts_with("inc-"));
}

#[tokio::test]
async fn unscopable_question_requires_user_input() {
    let (investigator, memory) = investigator();
    let outcome = investigator.investigate("how do I bake bread", window()).await;

    assert!(outcome.requires_user_input);
    assert_eq!(
        outcome.available_services,
        vec![
            ServiceId::new("checkout"),
            ServiceId::new("payments"),
            ServiceId::new("ledger-db"),
            ServiceId::new("search"),
        ]
    );
    assert!(outcome.steps.is_empty());
    assert!(outcome.root_causes.is_empty());
    assert_eq!(outcome.confidence.score, 0.0);
    // Nothing to remember for an investigation that never ran.
    assert!(memory.incidents().is_empty());
}

#[tokio::test]
async fn identical_inputs_yield_identical_conclusions() {
    let (first, _) = investigator();
    let (second, _) = investigator();
    let question = "Why is checkout failing with timeout errors?";

    let a = first.investigate(question, window()).await;
    let b = second.investigate(question, window()).await;

    assert_eq!(a.answer, b.answer);
    assert_eq!(a.root_causes, b.root_causes);
    assert_eq!(a.confidence.score, b.confidence.score);
    assert_eq!(a.confidence.reasoning, b.confidence.reasoning);
    let a_findings: Vec<_> = a.steps.iter().map(|s| &s.findings).collect();
    let b_findings: Vec<_> = b.steps.iter().map(|s| &s.findings).collect();
    assert_eq!(a_findings, b_findings);
}
