//! Pattern extraction over raw query results.
//!
//! Turns one step's result batch into low-cardinality field/value findings
//! plus a one-line summary and the sufficient-evidence verdict the engine
//! uses to decide whether to keep investigating.

use serde_json::Value;

use sleuth_core::entities::{Finding, IntentSummary};
use sleuth_core::enums::Significance;
use sleuth_core::record::{LogRecord, QueryBatch};

/// Fields never considered pattern candidates.
const EXCLUDED_FIELDS: [&str; 2] = ["_time", "_raw"];

/// Distinct-value ceiling for a field to count as low-cardinality.
const MAX_DISTINCT_VALUES: usize = 5;

/// The analysis of one step's query results.
#[derive(Debug, Clone, PartialEq)]
pub struct StepAnalysis {
    pub summary: String,
    pub findings: Vec<Finding>,
    pub result_count: usize,
    pub sufficient_evidence: bool,
}

/// Analyze one result batch against a hypothesis.
///
/// Evidence is sufficient when the store reported at least one result and
/// at least two findings were extracted.
#[must_use]
pub fn analyze_batch(batch: &QueryBatch, hypothesis: &str, intent: &IntentSummary) -> StepAnalysis {
    let result_count = batch.total_count;
    let findings = if result_count > 0 {
        extract_patterns(&batch.records, intent)
    } else {
        Vec::new()
    };
    let summary = summarize(result_count, &findings, hypothesis);
    let sufficient_evidence = result_count > 0 && findings.len() >= 2;
    StepAnalysis { summary, findings, result_count, sufficient_evidence }
}

/// Extract low-cardinality field/value findings from raw records.
///
/// Groups scalar values per field (excluding the internal time/raw-payload
/// fields), keeps fields with at most five distinct values, and grades the
/// most frequent value of each: `high` when it textually overlaps an
/// intent entity or symptom keyword (substring either direction,
/// case-insensitive) or when its share exceeds half the records, `medium`
/// otherwise. Output order is intent matches first, then high significance,
/// discovery order within each tier.
#[must_use]
pub fn extract_patterns(records: &[LogRecord], intent: &IntentSummary) -> Vec<Finding> {
    let entities: Vec<String> = intent.entities.iter().map(|e| e.to_lowercase()).collect();
    let keywords: Vec<String> =
        intent.symptom_keywords.iter().map(|k| k.to_lowercase()).collect();

    // Per-field value counts, both levels in first-seen order.
    let mut field_counts: Vec<(String, Vec<(String, usize)>)> = Vec::new();
    for record in records {
        for (key, value) in &record.fields {
            if EXCLUDED_FIELDS.contains(&key.as_str()) {
                continue;
            }
            let Some(text) = value_text(value) else { continue };
            let idx = match field_counts.iter().position(|(f, _)| f == key) {
                Some(idx) => idx,
                None => {
                    field_counts.push((key.clone(), Vec::new()));
                    field_counts.len() - 1
                }
            };
            let counts = &mut field_counts[idx].1;
            match counts.iter_mut().find(|(v, _)| *v == text) {
                Some((_, n)) => *n += 1,
                None => counts.push((text, 1)),
            }
        }
    }

    let mut findings = Vec::new();
    for (field, counts) in &field_counts {
        if counts.len() > MAX_DISTINCT_VALUES {
            continue;
        }
        let Some((value, count)) = first_max(counts) else { continue };
        let value_lower = value.to_lowercase();
        let overlaps = |candidates: &[String]| {
            candidates.iter().any(|c| value_lower.contains(c.as_str()) || c.contains(&value_lower))
        };
        let matches_intent = overlaps(&entities) || overlaps(&keywords);
        let significance = if matches_intent || count * 2 > records.len() {
            Significance::High
        } else {
            Significance::Medium
        };
        findings.push(Finding {
            field: field.clone(),
            value: value.clone(),
            count,
            significance,
            matches_intent,
        });
    }

    findings.sort_by_key(|f| {
        std::cmp::Reverse((f.matches_intent, f.significance == Significance::High))
    });
    findings
}

// Ties keep the first-seen value, so output is stable across runs.
fn first_max(counts: &[(String, usize)]) -> Option<(&String, usize)> {
    let mut top: Option<(&String, usize)> = None;
    for (value, n) in counts {
        match top {
            Some((_, best)) if *n <= best => {}
            _ => top = Some((value, *n)),
        }
    }
    top
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn summarize(count: usize, findings: &[Finding], hypothesis: &str) -> String {
    if count == 0 {
        return format!("No results found for hypothesis: {hypothesis}");
    }
    match findings.first() {
        Some(top) => {
            let intent_note =
                if top.matches_intent { " (matches extracted entities/keywords)" } else { "" };
            format!(
                "Found {count} results. Key pattern: {}={} (count: {}){intent_note}",
                top.field, top.value, top.count
            )
        }
        None => format!("Found {count} results. No clear patterns identified."),
    }
}
