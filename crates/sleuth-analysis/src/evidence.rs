//! Evidence collection from finished investigation steps.
//!
//! Two sources feed the evidence list: structured findings (relevance 0.9
//! high, 0.7 medium) and raw error samples from the first records of each
//! step that returned results (relevance 0.75). Samples tag the record's
//! raw index name as their service, without catalog mapping.

use sleuth_core::entities::{EvidenceItem, InvestigationStep};
use sleuth_core::enums::{FindingType, Significance};
use sleuth_core::ids::ServiceId;
use sleuth_core::record::LogRecord;

use crate::classify::ERROR_TEXT_MARKERS;

/// Collect and rank the evidence backing an investigation.
///
/// Sorted descending by relevance; ties keep input order, so findings from
/// earlier steps surface first.
#[must_use]
pub fn extract_evidence(steps: &[InvestigationStep]) -> Vec<EvidenceItem> {
    let mut evidence = Vec::new();
    for step in steps {
        let source = format!("Step {}: {}", step.step_number, step.hypothesis);
        for finding in &step.findings {
            let relevance = if finding.significance == Significance::High { 0.9 } else { 0.7 };
            evidence.push(EvidenceItem {
                source: source.clone(),
                content: format!("{}={} (count: {})", finding.field, finding.value, finding.count),
                relevance,
                significance: finding.significance,
                matches_intent: finding.matches_intent,
                step_number: step.step_number,
                timestamp: Some(step.timestamp.to_rfc3339()),
                service: None,
                finding_type: Some(FindingType::Pattern),
            });
        }
        if step.results.total_count > 0 {
            for record in step.results.records.iter().take(5) {
                let Some(sample) = error_sample(record) else { continue };
                evidence.push(EvidenceItem {
                    source: source.clone(),
                    content: sample.message,
                    relevance: 0.75,
                    significance: Significance::Medium,
                    matches_intent: false,
                    step_number: step.step_number,
                    timestamp: sample.timestamp,
                    service: Some(sample.service),
                    finding_type: Some(FindingType::ErrorSample),
                });
            }
        }
    }
    evidence.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    tracing::debug!(items = evidence.len(), steps = steps.len(), "collected evidence");
    evidence
}

struct ErrorSample {
    message: String,
    timestamp: Option<String>,
    service: ServiceId,
}

/// Sample a record when its message text contains an error marker. The
/// scan is keyword-only; level fields do not qualify a record here.
fn error_sample(record: &LogRecord) -> Option<ErrorSample> {
    let message = record.text("message").or_else(|| record.text("_raw"))?;
    let lowered = message.to_lowercase();
    if !ERROR_TEXT_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return None;
    }
    Some(ErrorSample {
        message: clip(&message, 200),
        timestamp: record.timestamp_text(),
        service: ServiceId::new(record.source_index().unwrap_or_else(|| "unknown".to_string())),
    })
}

fn clip(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
