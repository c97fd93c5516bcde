//! Event correlation: transaction grouping, temporal proximity, and
//! historical recurrence matching.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;

use sleuth_core::entities::{
    ErrorSignature, HistoricalMatch, Incident, RelatedEvent, TemporalCluster, TransactionEvent,
};
use sleuth_core::record::LogRecord;
use sleuth_core::timeutil::parse_timestamp;

use crate::classify::{extract_error_codes, extract_error_keywords, is_error_record};

/// Correlation-id field aliases, checked in priority order.
pub const CORRELATION_FIELDS: [&str; 6] = [
    "transactionId",
    "transaction_id",
    "traceId",
    "trace_id",
    "correlationId",
    "correlation_id",
];

fn correlation_res() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        CORRELATION_FIELDS
            .iter()
            .map(|field| {
                let pattern = format!(r#"(?i){field}[=:]\s*["']?([a-zA-Z0-9\-_]+)["']?"#);
                Regex::new(&pattern).expect("hardcoded regex compiles")
            })
            .collect()
    })
}

/// Extract a correlation identifier from a record.
///
/// Direct fields are checked first (case-sensitive, in
/// [`CORRELATION_FIELDS`] order), then the raw payload is scanned with a
/// case-insensitive `key=value` / `key: "value"` regex per alias. The
/// first alias that yields anything wins, regardless of position in the
/// payload.
#[must_use]
pub fn extract_correlation_id(record: &LogRecord) -> Option<String> {
    for field in CORRELATION_FIELDS {
        if let Some(value) = record.text(field) {
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    let raw = record.text("_raw")?;
    for re in correlation_res() {
        if let Some(caps) = re.captures(&raw) {
            if let Some(m) = caps.get(1) {
                return Some(m.as_str().to_string());
            }
        }
    }
    None
}

/// Group events by correlation identifier.
///
/// Every group is returned, including singletons; the engine filters to
/// multi-event groups when assembling the correlation bundle. Events
/// within a group are sorted ascending by timestamp text.
#[must_use]
pub fn correlate_by_transaction(events: &[LogRecord]) -> BTreeMap<String, Vec<TransactionEvent>> {
    let mut transactions: BTreeMap<String, Vec<TransactionEvent>> = BTreeMap::new();
    for event in events {
        let Some(correlation_id) = extract_correlation_id(event) else { continue };
        transactions.entry(correlation_id).or_default().push(TransactionEvent {
            event: event.clone(),
            service: event.source_index().unwrap_or_else(|| "unknown".to_string()),
            timestamp: event.timestamp_text(),
        });
    }
    for group in transactions.values_mut() {
        group.sort_by_key(|e| e.timestamp.clone().unwrap_or_default());
    }
    tracing::debug!(
        transactions = transactions.len(),
        events = transactions.values().map(Vec::len).sum::<usize>(),
        "grouped events by correlation id"
    );
    transactions
}

/// Find events within `window_seconds` of each other.
///
/// Pairwise comparison over timestamp-parseable events; unparseable
/// timestamps exclude an event from correlation without failing the batch.
/// Fewer than two events yields no clusters.
#[must_use]
pub fn correlate_by_time(events: &[LogRecord], window_seconds: f64) -> Vec<TemporalCluster> {
    let mut clusters = Vec::new();
    if events.len() < 2 {
        return clusters;
    }

    let mut sorted: Vec<&LogRecord> = events.iter().collect();
    sorted.sort_by_key(|e| e.timestamp_text().unwrap_or_default());

    let times: Vec<Option<chrono::DateTime<chrono::Utc>>> = sorted
        .iter()
        .map(|e| e.timestamp_text().as_deref().and_then(parse_timestamp))
        .collect();

    for (i, anchor) in sorted.iter().enumerate() {
        let Some(anchor_time) = times[i] else { continue };
        let mut related_events = Vec::new();
        for (j, other) in sorted.iter().enumerate() {
            if i == j {
                continue;
            }
            let Some(other_time) = times[j] else { continue };
            let diff = (anchor_time - other_time).abs().as_seconds_f64();
            if diff <= window_seconds {
                related_events.push(RelatedEvent {
                    event: (*other).clone(),
                    time_diff_seconds: diff,
                });
            }
        }
        if !related_events.is_empty() {
            clusters.push(TemporalCluster { anchor_event: (*anchor).clone(), related_events });
        }
    }
    clusters
}

/// Reduce error-classified events to signatures for historical matching.
#[must_use]
pub fn extract_error_signatures(events: &[LogRecord]) -> Vec<ErrorSignature> {
    events
        .iter()
        .filter(|e| is_error_record(e))
        .map(|event| {
            let raw = event.raw_text().unwrap_or_default();
            ErrorSignature {
                service: event.source_index().unwrap_or_else(|| "unknown".to_string()),
                error_keywords: extract_error_keywords(&raw),
                error_codes: extract_error_codes(&raw),
            }
        })
        .collect()
}

/// Weighted similarity of two error signatures.
///
/// 0.4 for an exact service match, 0.4 times the Jaccard overlap of
/// keyword sets, 0.2 times the Jaccard overlap of code sets. Empty sets
/// contribute nothing on either side.
#[must_use]
pub fn signature_similarity(a: &ErrorSignature, b: &ErrorSignature) -> f64 {
    let mut score = 0.0;
    if a.service == b.service {
        score += 0.4;
    }
    score += 0.4 * jaccard(&a.error_keywords, &b.error_keywords);
    score += 0.2 * jaccard(&a.error_codes, &b.error_codes);
    score
}

fn jaccard(a: &[String], b: &[String]) -> f64 {
    let a: BTreeSet<&String> = a.iter().collect();
    let b: BTreeSet<&String> = b.iter().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count();
    #[allow(clippy::cast_precision_loss)]
    {
        intersection as f64 / union as f64
    }
}

/// Match current error signatures against historical incidents.
///
/// Every (current, historical) signature pair at or above `threshold` is
/// kept, sorted descending by similarity (stable). Incidents without
/// stored events produce no signatures and therefore never match.
#[must_use]
pub fn find_recurring_patterns(
    current_events: &[LogRecord],
    incidents: &[Incident],
    threshold: f64,
) -> Vec<HistoricalMatch> {
    let current_signatures = extract_error_signatures(current_events);
    let mut recurring = Vec::new();

    for incident in incidents {
        let historical_signatures = extract_error_signatures(&incident.events);
        for current in &current_signatures {
            for historical in &historical_signatures {
                let similarity = signature_similarity(current, historical);
                if similarity >= threshold {
                    recurring.push(HistoricalMatch {
                        signature: current.clone(),
                        incident: incident.clone(),
                        similarity,
                        resolution: incident.resolution_text().to_string(),
                    });
                }
            }
        }
    }

    recurring.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    tracing::debug!(matches = recurring.len(), "matched recurring error patterns");
    recurring
}
