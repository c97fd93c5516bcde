//! Deterministic fallbacks for failed collaborator calls.
//!
//! The hypothesis fallback keeps the loop alive with two generic scans;
//! the answer fallback assembles a readable conclusion from whatever the
//! analysis produced. Both are pure functions so the degraded path is as
//! testable as the happy path.

use sleuth_core::entities::Hypothesis;

use crate::traits::AnswerContext;

/// The two generic hypotheses used when generation fails.
#[must_use]
pub fn generic_hypotheses() -> Vec<Hypothesis> {
    vec![
        Hypothesis::new(
            "Recent error or exception entries in the relevant logs explain the reported symptom",
            1,
        ),
        Hypothesis::new(
            "A service outage or performance degradation occurred during the reported time window",
            2,
        ),
    ]
}

/// Assemble the deterministic template answer.
///
/// Lists the first three step summaries, the top root cause, the top three
/// evidence lines, the confidence percentage, and a next-step suggestion
/// keyed by the dominant error keyword in the evidence.
#[must_use]
pub fn template_answer(context: &AnswerContext<'_>) -> String {
    let mut lines = vec![format!("Investigation of: {}", context.question)];

    if !context.steps.is_empty() {
        lines.push(String::new());
        lines.push("Steps taken:".to_string());
        for step in context.steps.iter().take(3) {
            lines.push(format!("  {}. {}", step.step_number, step.summary));
        }
    }

    if let Some(top) = context.root_causes.first() {
        lines.push(String::new());
        lines.push(format!(
            "Most likely root cause: {} (confidence {:.0}%)",
            top.description,
            top.confidence * 100.0
        ));
    }

    if !context.evidence.is_empty() {
        lines.push(String::new());
        lines.push("Key evidence:".to_string());
        for item in context.evidence.iter().take(3) {
            lines.push(format!("  - {} [{}]", item.content, item.source));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Overall confidence: {:.0}% ({})",
        context.confidence.score * 100.0,
        context.confidence.level
    ));
    lines.push(next_step_suggestion(context));

    lines.join("\n")
}

/// Pick a next-step suggestion from the dominant error keyword across the
/// evidence contents (first matching keyword family wins).
fn next_step_suggestion(context: &AnswerContext<'_>) -> String {
    let corpus: String = context
        .evidence
        .iter()
        .map(|item| item.content.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let suggestion = if corpus.contains("timeout") {
        "check timeout configuration and downstream latency for the implicated service"
    } else if corpus.contains("connection") || corpus.contains("connect") {
        "verify network connectivity and connection pool health for the implicated service"
    } else if ["500", "502", "503", "504", "5xx"].iter().any(|code| corpus.contains(code)) {
        "inspect server-side error responses and recent deployments of the implicated service"
    } else if corpus.contains("auth") || corpus.contains("unauthorized") || corpus.contains("forbidden")
    {
        "review authentication configuration and recent credential or permission changes"
    } else {
        "review the full error logs for the implicated service and correlate with recent changes"
    };
    format!("Next step: {suggestion}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sleuth_core::entities::{ConfidenceReport, EvidenceItem};
    use sleuth_core::enums::Significance;

    fn evidence(content: &str) -> EvidenceItem {
        EvidenceItem {
            source: "Step 1: test".to_string(),
            content: content.to_string(),
            relevance: 0.9,
            significance: Significance::High,
            matches_intent: false,
            step_number: 1,
            timestamp: None,
            service: None,
            finding_type: None,
        }
    }

    fn context<'a>(
        evidence: &'a [EvidenceItem],
        confidence: &'a ConfidenceReport,
    ) -> AnswerContext<'a> {
        AnswerContext {
            question: "why is checkout failing",
            evidence,
            steps: &[],
            confidence,
            root_causes: &[],
            correlations: None,
        }
    }

    #[test]
    fn generic_hypotheses_are_priority_ordered() {
        let hypotheses = generic_hypotheses();
        assert_eq!(hypotheses.len(), 2);
        assert!(hypotheses[0].priority < hypotheses[1].priority);
    }

    #[test]
    fn suggestion_keys_on_the_dominant_error_keyword() {
        let confidence = ConfidenceReport::empty();

        let items = vec![evidence("error=timeout (count: 4)")];
        let answer = template_answer(&context(&items, &confidence));
        assert!(answer.contains("timeout configuration"));

        let items = vec![evidence("status=503 (count: 2)")];
        let answer = template_answer(&context(&items, &confidence));
        assert!(answer.contains("server-side error responses"));

        let items = vec![evidence("error=unauthorized (count: 1)")];
        let answer = template_answer(&context(&items, &confidence));
        assert!(answer.contains("authentication configuration"));

        let items = vec![evidence("level=warn (count: 9)")];
        let answer = template_answer(&context(&items, &confidence));
        assert!(answer.contains("review the full error logs"));
    }

    #[test]
    fn timeout_wins_over_later_keyword_families() {
        let confidence = ConfidenceReport::empty();
        let items = vec![evidence("message=connection timeout to db (count: 3)")];
        let answer = template_answer(&context(&items, &confidence));
        assert!(answer.contains("timeout configuration"));
    }

    #[test]
    fn answer_reports_confidence_percentage() {
        let mut confidence = ConfidenceReport::empty();
        confidence.score = 0.72;
        let answer = template_answer(&context(&[], &confidence));
        assert!(answer.contains("Overall confidence: 72%"));
    }
}
