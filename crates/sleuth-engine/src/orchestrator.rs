//! The investigation orchestrator.
//!
//! Drives one question end-to-end: intent extraction, service resolution,
//! history retrieval, the hypothesis loop, upstream tracing, correlation,
//! root-cause ranking, confidence scoring, and answer synthesis. The loop
//! is strictly sequential because each step's stop condition depends on
//! the previous result; concurrent investigations share only the read-only
//! catalog.
//!
//! Every collaborator call is bounded by the configured timeout and
//! degrades on failure -- a failed query becomes an empty-result step, a
//! failed generator falls back to the generic hypotheses, a failed store
//! is logged and swallowed. The only user-facing terminal state besides a
//! finished investigation is the unresolvable-intent exit, which is a
//! structured outcome, not an error.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use sleuth_analysis::confidence::score_confidence;
use sleuth_analysis::correlation::{
    correlate_by_time, correlate_by_transaction, find_recurring_patterns,
};
use sleuth_analysis::evidence::extract_evidence;
use sleuth_analysis::patterns::analyze_batch;
use sleuth_analysis::rca::RootCauseRanker;
use sleuth_catalog::ServiceCatalog;
use sleuth_core::entities::{
    ConfidenceReport, CorrelationBundle, Hypothesis, Incident, IntentSummary, InvestigationStep,
};
use sleuth_core::ids::{PREFIX_INCIDENT, ServiceId, new_id};
use sleuth_core::record::LogRecord;
use sleuth_core::responses::InvestigationOutcome;
use sleuth_core::timeutil::TimeWindow;

use crate::error::CollaboratorError;
use crate::fallback;
use crate::settings::EngineSettings;
use crate::traits::{
    AnswerContext, AnswerSynthesizer, ExecutedQuery, HypothesisGenerator, IncidentMemory,
    IntentExtractor, QueryExecutor,
};

/// The five collaborator seams an [`Investigator`] needs.
#[derive(Clone)]
pub struct Collaborators {
    pub intent: Arc<dyn IntentExtractor>,
    pub hypotheses: Arc<dyn HypothesisGenerator>,
    pub executor: Arc<dyn QueryExecutor>,
    pub memory: Arc<dyn IncidentMemory>,
    pub answers: Arc<dyn AnswerSynthesizer>,
}

/// Runs investigations against a shared, read-only service catalog.
pub struct Investigator {
    catalog: Arc<ServiceCatalog>,
    collaborators: Collaborators,
    ranker: RootCauseRanker,
    settings: EngineSettings,
}

impl Investigator {
    #[must_use]
    pub fn new(
        catalog: Arc<ServiceCatalog>,
        collaborators: Collaborators,
        settings: EngineSettings,
    ) -> Self {
        let ranker = RootCauseRanker::new(Arc::clone(&catalog));
        Self { catalog, collaborators, ranker, settings }
    }

    /// Investigate one question over the given time window.
    ///
    /// Never fails: collaborator errors degrade per call site, and an
    /// unscopable question produces a `requires_user_input` outcome
    /// carrying the full catalog service list. Dropping the returned
    /// future between awaits cancels the investigation without starting
    /// further steps.
    pub async fn investigate(&self, question: &str, window: TimeWindow) -> InvestigationOutcome {
        let started = Instant::now();
        tracing::info!(question, "starting investigation");

        let intent = match self.bounded(self.collaborators.intent.extract(question)).await {
            Ok(intent) => intent,
            Err(error) => {
                tracing::warn!(%error, "intent extraction failed; continuing unscoped");
                IntentSummary::default()
            }
        };

        let scoped = self.resolve_scope(&intent);
        if scoped.is_empty() && intent.is_unscoped() {
            tracing::info!(question, "question could not be scoped to any service");
            return self.needs_input_outcome(started);
        }

        let history = match self
            .bounded(self.collaborators.memory.retrieve_similar(question, window))
            .await
        {
            Ok(incidents) => incidents,
            Err(error) => {
                tracing::warn!(%error, "incident retrieval failed; continuing without history");
                Vec::new()
            }
        };

        let hypotheses = match self
            .bounded(self.collaborators.hypotheses.generate(question, &intent, &history))
            .await
        {
            Ok(generated) if !generated.is_empty() => generated,
            Ok(_) => fallback::generic_hypotheses(),
            Err(error) => {
                tracing::warn!(%error, "hypothesis generation failed; using generic hypotheses");
                fallback::generic_hypotheses()
            }
        };
        let mut ordered = hypotheses;
        ordered.sort_by_key(|h| h.priority);

        let mut steps = Vec::new();
        for hypothesis in &ordered {
            let sufficient = self.run_step(&mut steps, hypothesis, question, window, &intent).await;
            if sufficient {
                tracing::debug!(steps = steps.len(), "sufficient evidence; stopping loop");
                break;
            }
        }

        if steps.iter().any(InvestigationStep::has_high_significance_finding) {
            self.trace_upstream(&mut steps, &scoped, question, window, &intent).await;
        }

        let correlations = self.correlate(&steps, &history);
        let root_causes = self.ranker.identify_root_causes(&steps, &intent);
        let evidence = extract_evidence(&steps);
        let confidence = score_confidence(&evidence, &steps, &root_causes, correlations.as_ref());

        let context = AnswerContext {
            question,
            evidence: &evidence,
            steps: &steps,
            confidence: &confidence,
            root_causes: &root_causes,
            correlations: correlations.as_ref(),
        };
        let answer = match self.bounded(self.collaborators.answers.synthesize(&context)).await {
            Ok(answer) => answer,
            Err(error) => {
                tracing::warn!(%error, "answer synthesis failed; using template answer");
                fallback::template_answer(&context)
            }
        };

        self.store_incident(question, &answer).await;

        let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(
            steps = steps.len(),
            root_causes = root_causes.len(),
            score = confidence.score,
            processing_time_ms,
            "investigation finished"
        );

        InvestigationOutcome {
            answer,
            confidence,
            evidence,
            steps,
            root_causes,
            correlations: correlations.unwrap_or_default(),
            requires_user_input: false,
            available_services: Vec::new(),
            processing_time_ms,
            timestamp: Utc::now(),
        }
    }

    /// Resolve the intent's services, indexes, and entities to catalog
    /// services, deduplicated in resolution order.
    fn resolve_scope(&self, intent: &IntentSummary) -> Vec<ServiceId> {
        let mut seen = BTreeSet::new();
        let mut scoped = Vec::new();
        for service in self.catalog.resolve_entities(&intent.services) {
            if seen.insert(service.id.clone()) {
                scoped.push(service.id.clone());
            }
        }
        for index in &intent.indexes {
            if let Some(owner) = self.catalog.owner_of_index(index) {
                if seen.insert(owner.id.clone()) {
                    scoped.push(owner.id.clone());
                }
            }
        }
        for service in self.catalog.resolve_entities(&intent.entities) {
            if seen.insert(service.id.clone()) {
                scoped.push(service.id.clone());
            }
        }
        scoped
    }

    /// Execute one hypothesis as the next numbered step. Returns whether
    /// the step's analysis found sufficient evidence.
    async fn run_step(
        &self,
        steps: &mut Vec<InvestigationStep>,
        hypothesis: &Hypothesis,
        question: &str,
        window: TimeWindow,
        intent: &IntentSummary,
    ) -> bool {
        let step_number = steps.len() + 1;
        let executed = match self
            .bounded(self.collaborators.executor.run(hypothesis, question, window, intent))
            .await
        {
            Ok(executed) => executed,
            Err(error) => {
                tracing::warn!(
                    step_number,
                    %error,
                    "query execution failed; degrading to empty results"
                );
                ExecutedQuery::degraded()
            }
        };

        let analysis = analyze_batch(&executed.batch, &hypothesis.text, intent);
        tracing::debug!(
            step_number,
            results = analysis.result_count,
            findings = analysis.findings.len(),
            "step analyzed"
        );
        steps.push(InvestigationStep {
            step_number,
            hypothesis: hypothesis.text.clone(),
            query: executed.query,
            summary: analysis.summary,
            findings: analysis.findings,
            results: executed.batch,
            timestamp: Utc::now(),
        });
        analysis.sufficient_evidence
    }

    /// Issue one extra step per not-yet-investigated upstream dependency
    /// of the scoped services, in declaration order, capped by settings.
    /// Step numbers continue from the primary loop.
    async fn trace_upstream(
        &self,
        steps: &mut Vec<InvestigationStep>,
        scoped: &[ServiceId],
        question: &str,
        window: TimeWindow,
        intent: &IntentSummary,
    ) {
        let investigated: BTreeSet<ServiceId> = scoped.iter().cloned().collect();
        let mut targets: Vec<(ServiceId, Vec<String>)> = Vec::new();
        for id in scoped {
            for dep in self.catalog.upstream_of(id) {
                if investigated.contains(&dep.service)
                    || targets.iter().any(|(t, _)| t == &dep.service)
                {
                    continue;
                }
                // Only trace dependencies we can actually query.
                if self.catalog.indexes_of(&dep.service).is_empty() {
                    continue;
                }
                targets.push((dep.service.clone(), dep.failure_modes.clone()));
            }
        }
        targets.truncate(self.settings.upstream_trace_limit);
        tracing::debug!(targets = targets.len(), "tracing upstream dependencies");

        for (service, failure_modes) in targets {
            let text = if failure_modes.is_empty() {
                format!("Upstream dependency {service} may be degraded")
            } else {
                format!(
                    "Upstream dependency {service} may be degraded (known failure modes: {})",
                    failure_modes.join(", ")
                )
            };
            let hypothesis = Hypothesis::new(text, 1);
            self.run_step(steps, &hypothesis, question, window, intent).await;
        }
    }

    /// Assemble the correlation bundle over every record the steps
    /// returned. Transaction and temporal correlation run whenever the
    /// steps returned records; historical matching additionally needs
    /// findings and a non-empty history.
    fn correlate(
        &self,
        steps: &[InvestigationStep],
        history: &[Incident],
    ) -> Option<CorrelationBundle> {
        // Upstream-trace steps can re-query an index an earlier step
        // already covered, so the same physical event may come back more
        // than once. Correlate over distinct records only.
        let mut records: Vec<LogRecord> = Vec::new();
        for record in steps.iter().flat_map(|s| &s.results.records) {
            if !records.contains(record) {
                records.push(record.clone());
            }
        }
        if records.is_empty() {
            return None;
        }

        let mut transactions = correlate_by_transaction(&records);
        transactions.retain(|_, group| group.len() > 1);
        let mut temporal_clusters = correlate_by_time(&records, self.settings.temporal_window_secs);
        temporal_clusters.truncate(self.settings.max_temporal_clusters);

        let has_findings = steps.iter().any(|s| !s.findings.is_empty());
        let mut historical_matches = if has_findings && !history.is_empty() {
            find_recurring_patterns(
                &records,
                history,
                self.settings.historical_similarity_threshold,
            )
        } else {
            Vec::new()
        };
        historical_matches.truncate(self.settings.max_historical_matches);

        Some(CorrelationBundle { transactions, temporal_clusters, historical_matches })
    }

    async fn store_incident(&self, question: &str, answer: &str) {
        let incident = Incident {
            id: new_id(PREFIX_INCIDENT),
            question: question.to_string(),
            answer: answer.to_string(),
            resolution: None,
            events: Vec::new(),
            occurred_at: Some(Utc::now()),
        };
        if let Err(error) = self.bounded(self.collaborators.memory.store(incident)).await {
            tracing::warn!(%error, "failed to store incident; continuing");
        }
    }

    fn needs_input_outcome(&self, started: Instant) -> InvestigationOutcome {
        let available_services = self.catalog.service_ids();
        let answer = format!(
            "I could not match your question to any known service, log index, or \
             application. Please mention one of the {} cataloged services so the \
             investigation can be scoped.",
            available_services.len()
        );
        InvestigationOutcome {
            answer,
            confidence: ConfidenceReport::empty(),
            evidence: Vec::new(),
            steps: Vec::new(),
            root_causes: Vec::new(),
            correlations: CorrelationBundle::empty(),
            requires_user_input: true,
            available_services,
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            timestamp: Utc::now(),
        }
    }

    /// Bound a collaborator call by the configured timeout.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, CollaboratorError>>,
    ) -> Result<T, CollaboratorError> {
        match tokio::time::timeout(self.settings.collaborator_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CollaboratorError::Timeout),
        }
    }
}
