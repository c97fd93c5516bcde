//! Six-factor weighted confidence scoring.
//!
//! Each factor scores in `[0, 1]` and contributes its fixed weight to the
//! overall score, which is clamped and rounded to two decimals before the
//! level bands apply. An investigation with no evidence at all
//! short-circuits to a zero report.

use std::collections::{BTreeMap, BTreeSet};

use sleuth_core::entities::{
    ConfidenceFactors, ConfidenceReport, CorrelationBundle, EvidenceItem, Factor,
    HistoricalMatch, InvestigationStep, RootCause, SupportingEvidence, TransactionEvent,
};
use sleuth_core::enums::{ConfidenceLevel, EvidenceImpact, FactorKind, RootCauseKind};
use sleuth_core::ids::ServiceId;

/// Score how much to trust the investigation's conclusion.
///
/// `correlations` is `None` when correlation analysis never ran; the
/// temporal and historical factors then hold at their 0.5 baselines.
#[must_use]
pub fn score_confidence(
    evidence: &[EvidenceItem],
    steps: &[InvestigationStep],
    root_causes: &[RootCause],
    correlations: Option<&CorrelationBundle>,
) -> ConfidenceReport {
    if evidence.is_empty() {
        return empty_evidence_report();
    }

    let factors = ConfidenceFactors {
        quality: quality_factor(evidence),
        quantity: quantity_factor(evidence),
        pattern_consistency: consistency_factor(evidence, steps),
        service_correlation: service_factor(root_causes),
        temporal_correlation: temporal_factor(correlations),
        historical_match: historical_factor(correlations),
    };

    let score = round2(factors.weighted_total().clamp(0.0, 1.0));
    let level = ConfidenceLevel::from_score(score);
    let supporting_evidence = supporting(&factors);
    let reasoning = reasoning(score, level, &factors);
    tracing::debug!(score, level = %level, "scored confidence");

    ConfidenceReport { score, level, factors, supporting_evidence, reasoning }
}

fn empty_evidence_report() -> ConfidenceReport {
    let mut factors = ConfidenceFactors::zeroed();
    factors.quantity =
        Factor::new(FactorKind::Quantity, 0.0, vec!["No evidence items found".to_string()]);
    ConfidenceReport {
        score: 0.0,
        level: ConfidenceLevel::VeryLow,
        supporting_evidence: supporting(&factors),
        reasoning: "No evidence was collected, so confidence cannot be established.".to_string(),
        factors,
    }
}

/// Quality blends average relevance (60%) with the share of items at or
/// above 0.7 relevance (40%).
fn quality_factor(evidence: &[EvidenceItem]) -> Factor {
    let len = evidence.len();
    let avg = evidence.iter().map(|e| e.relevance).sum::<f64>() / as_f64(len);
    let strong = evidence.iter().filter(|e| e.relevance >= 0.7).count();
    let score = 0.6 * avg + 0.4 * (as_f64(strong) / as_f64(len));
    Factor::new(
        FactorKind::Quality,
        score,
        vec![
            format!("Average evidence relevance {avg:.2}"),
            format!("{strong} of {len} items at or above 0.70 relevance"),
        ],
    )
}

fn quantity_factor(evidence: &[EvidenceItem]) -> Factor {
    let count = evidence.len();
    let score = match count {
        0 => 0.0,
        1..=2 => 0.3,
        3..=5 => 0.6,
        6..=10 => 0.85,
        _ => 1.0,
    };
    let findings = if count == 0 {
        vec!["No evidence items found".to_string()]
    } else {
        vec![format!("{count} evidence items collected")]
    };
    Factor::new(FactorKind::Quantity, score, findings)
}

/// Consistency rewards evidence concentrating on one service, with a small
/// bonus when at least two steps produced findings.
fn consistency_factor(evidence: &[EvidenceItem], steps: &[InvestigationStep]) -> Factor {
    let mut findings = Vec::new();
    let tagged: Vec<&ServiceId> = evidence.iter().filter_map(|e| e.service.as_ref()).collect();

    let mut score: f64 = 0.3;
    if tagged.is_empty() {
        findings.push("No service-tagged evidence".to_string());
    } else if let Some((dominant, dominant_count)) = dominant_service(&tagged) {
        let share = as_f64(dominant_count) / as_f64(tagged.len());
        score = if share >= 0.6 {
            0.9
        } else if share >= 0.4 {
            0.6
        } else {
            0.3
        };
        findings.push(format!(
            "Service {dominant} accounts for {dominant_count} of {} service-tagged items",
            tagged.len()
        ));
    }

    let steps_with_findings = steps.iter().filter(|s| !s.findings.is_empty()).count();
    if steps_with_findings >= 2 {
        score = (score + 0.1).min(1.0);
        findings.push(format!("{steps_with_findings} steps produced findings"));
    }
    Factor::new(FactorKind::PatternConsistency, score, findings)
}

/// The most frequently tagged service; ties go to the lexically smallest id.
fn dominant_service<'a>(tagged: &[&'a ServiceId]) -> Option<(&'a ServiceId, usize)> {
    let mut counts: BTreeMap<&ServiceId, usize> = BTreeMap::new();
    for service in tagged {
        *counts.entry(service).or_insert(0) += 1;
    }
    let mut dominant: Option<(&'a ServiceId, usize)> = None;
    for (service, n) in counts {
        match dominant {
            Some((_, best)) if n <= best => {}
            _ => dominant = Some((service, n)),
        }
    }
    dominant
}

fn service_factor(root_causes: &[RootCause]) -> Factor {
    let kind = FactorKind::ServiceCorrelation;
    if let Some(cause) = root_causes.iter().find(|c| c.kind == RootCauseKind::CascadeOrigin) {
        return Factor::new(
            kind,
            0.95,
            vec![format!("Cascade origin identified: {}", cause_service(cause))],
        );
    }
    if let Some(cause) = root_causes.iter().find(|c| c.kind == RootCauseKind::UpstreamFailure) {
        return Factor::new(
            kind,
            0.85,
            vec![format!("Upstream failure identified: {}", cause_service(cause))],
        );
    }
    if root_causes.is_empty() {
        return Factor::new(kind, 0.4, vec!["No root causes identified".to_string()]);
    }
    let avg = root_causes.iter().map(|c| c.confidence).sum::<f64>() / as_f64(root_causes.len());
    Factor::new(kind, avg * 0.8, vec![format!("Average root cause confidence {avg:.2}")])
}

fn temporal_factor(correlations: Option<&CorrelationBundle>) -> Factor {
    let kind = FactorKind::TemporalCorrelation;
    let Some(bundle) = correlations else {
        return Factor::new(kind, 0.5, vec!["No correlation data available".to_string()]);
    };

    let mut score: f64 = 0.5;
    let mut findings = Vec::new();
    if let Some((id, events)) =
        bundle.transactions.iter().find(|(_, events)| distinct_services(events) > 1)
    {
        score += 0.3;
        findings.push(format!("Transaction {id} spans {} services", distinct_services(events)));
    }
    if !bundle.temporal_clusters.is_empty() {
        score += 0.2;
        findings
            .push(format!("{} temporal clusters within the window", bundle.temporal_clusters.len()));
    }
    Factor::new(kind, score.min(1.0), findings)
}

fn historical_factor(correlations: Option<&CorrelationBundle>) -> Factor {
    let kind = FactorKind::HistoricalMatch;
    let Some(bundle) = correlations else {
        return Factor::new(kind, 0.5, vec!["No correlation data available".to_string()]);
    };
    let Some(best) = best_match(&bundle.historical_matches) else {
        return Factor::new(kind, 0.4, vec!["No historical matches found".to_string()]);
    };

    let mut score: f64 = if best.similarity >= 0.8 {
        0.95
    } else if best.similarity >= 0.6 {
        0.75
    } else if best.similarity >= 0.4 {
        0.55
    } else {
        0.4
    };
    let mut findings = vec![format!("Best historical match similarity {:.2}", best.similarity)];
    if !best.resolution.is_empty() && best.similarity >= 0.6 {
        score = (score + 0.05).min(1.0);
        findings.push("Matched incident carries resolution guidance".to_string());
    }
    Factor::new(kind, score, findings)
}

/// The highest-similarity match; ties keep the first entry.
fn best_match(matches: &[HistoricalMatch]) -> Option<&HistoricalMatch> {
    let mut best: Option<&HistoricalMatch> = None;
    for candidate in matches {
        match best {
            Some(current) if candidate.similarity <= current.similarity => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// One supporting-evidence entry per factor finding line, deduplicated by
/// factor kind and the first 50 characters of the line.
fn supporting(factors: &ConfidenceFactors) -> Vec<SupportingEvidence> {
    let mut entries = Vec::new();
    let mut seen: BTreeSet<(&'static str, String)> = BTreeSet::new();
    for (kind, factor) in factors.iter() {
        for finding in &factor.findings {
            if seen.insert((kind.as_str(), finding.chars().take(50).collect())) {
                entries.push(SupportingEvidence {
                    kind,
                    finding: finding.clone(),
                    impact: impact_of(factor.score),
                });
            }
        }
    }
    entries
}

fn impact_of(score: f64) -> EvidenceImpact {
    if score >= 0.7 {
        EvidenceImpact::Positive
    } else if score >= 0.4 {
        EvidenceImpact::Neutral
    } else {
        EvidenceImpact::Negative
    }
}

fn reasoning(score: f64, level: ConfidenceLevel, factors: &ConfidenceFactors) -> String {
    let mut ranked: Vec<(FactorKind, &Factor)> = factors.iter().collect();
    ranked.sort_by(|a, b| b.1.weighted.total_cmp(&a.1.weighted));
    format!(
        "Confidence is {level} ({score:.2}). Strongest signals: {} ({:.2}) and {} ({:.2}). \
         Weakest signals: {} ({:.2}) and {} ({:.2}).",
        ranked[0].0.display_name(),
        ranked[0].1.weighted,
        ranked[1].0.display_name(),
        ranked[1].1.weighted,
        ranked[4].0.display_name(),
        ranked[4].1.weighted,
        ranked[5].0.display_name(),
        ranked[5].1.weighted,
    )
}

fn distinct_services(events: &[TransactionEvent]) -> usize {
    events.iter().map(|e| e.service.as_str()).collect::<BTreeSet<_>>().len()
}

fn cause_service(cause: &RootCause) -> &str {
    cause.service.as_ref().map_or("unknown", ServiceId::as_str)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(n: usize) -> f64 {
    n as f64
}
