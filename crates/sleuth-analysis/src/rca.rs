//! Root-cause ranking over the accumulated investigation steps.
//!
//! The ranker consumes findings and raw error records, builds a lexical
//! timeline, detects cascades along catalog-declared dependency edges, and
//! assembles a deduplicated candidate list in strict priority order:
//! cascade origin, upstream failures, earliest error, frequent patterns.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::sync::Arc;

use sleuth_catalog::ServiceCatalog;
use sleuth_core::entities::{CascadeEdge, IntentSummary, InvestigationStep, RootCause, RootCauseEvidence};
use sleuth_core::enums::{ErrorCategory, RootCauseKind};
use sleuth_core::ids::ServiceId;
use sleuth_core::record::LogRecord;

use crate::classify::{categorize, is_error_record};

/// One error observation: a finding's value or a raw error record, tagged
/// with its owning service and category.
#[derive(Debug, Clone)]
struct ErrorPattern {
    value: String,
    count: usize,
    service: Option<ServiceId>,
    category: ErrorCategory,
}

#[derive(Debug, Clone)]
struct TimelineEvent {
    timestamp: String,
    service: Option<ServiceId>,
}

#[derive(Debug, Default)]
struct CascadeAnalysis {
    detected: bool,
    chain: Vec<CascadeEdge>,
    origin: Option<ServiceId>,
}

#[derive(Debug)]
struct OriginAnalysis {
    service: Option<ServiceId>,
    timestamp: String,
    confidence: f64,
}

#[derive(Debug, Clone)]
struct UpstreamFailure {
    service: ServiceId,
    affected: ServiceId,
    failure_modes: Vec<String>,
}

#[derive(Debug, Clone)]
struct DownstreamImpact {
    origin: ServiceId,
    affected: ServiceId,
}

#[derive(Debug, Default)]
struct DependencyAnalysis {
    affected_services: Vec<ServiceId>,
    upstream_failures: Vec<UpstreamFailure>,
    downstream_impact: Vec<DownstreamImpact>,
}

/// Ranks root-cause candidates against the shared service catalog.
#[derive(Debug, Clone)]
pub struct RootCauseRanker {
    catalog: Arc<ServiceCatalog>,
}

impl RootCauseRanker {
    #[must_use]
    pub fn new(catalog: Arc<ServiceCatalog>) -> Self {
        Self { catalog }
    }

    /// Identify and rank root causes from the finished step list.
    ///
    /// The result is sorted descending by confidence, holds at most one
    /// cause per distinct service, and is truncated to five entries.
    #[must_use]
    pub fn identify_root_causes(
        &self,
        steps: &[InvestigationStep],
        intent: &IntentSummary,
    ) -> Vec<RootCause> {
        let patterns = self.extract_error_patterns(steps);
        let timeline = self.build_timeline(steps);
        let cascade = self.analyze_cascade(&timeline);
        let origin = self.find_error_origin(&timeline, intent);
        let dependency = self.analyze_dependency_chain(&patterns);
        let causes = rank(&patterns, &cascade, origin.as_ref(), &dependency);
        tracing::debug!(
            causes = causes.len(),
            cascade = cascade.detected,
            "ranked root cause candidates"
        );
        causes
    }

    fn extract_error_patterns(&self, steps: &[InvestigationStep]) -> Vec<ErrorPattern> {
        let mut patterns = Vec::new();
        for step in steps {
            for finding in &step.findings {
                patterns.push(ErrorPattern {
                    value: finding.value.clone(),
                    count: finding.count,
                    service: None,
                    category: categorize(&finding.value),
                });
            }
            for record in &step.results.records {
                if is_error_record(record) {
                    let text = record.raw_text().unwrap_or_default();
                    patterns.push(ErrorPattern {
                        count: 1,
                        service: self.record_service(record),
                        category: categorize(&text),
                        value: text,
                    });
                }
            }
        }
        patterns
    }

    /// Timeline of (timestamp, service) pairs for dated error records,
    /// sorted ascending by timestamp string. The lexical sort is
    /// deliberate: it keeps ordering stable even when some timestamps
    /// would not parse.
    fn build_timeline(&self, steps: &[InvestigationStep]) -> Vec<TimelineEvent> {
        let mut events = Vec::new();
        for step in steps {
            for record in &step.results.records {
                let Some(timestamp) = record.timestamp_text() else { continue };
                if is_error_record(record) {
                    events.push(TimelineEvent { timestamp, service: self.record_service(record) });
                }
            }
        }
        events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        events
    }

    fn analyze_cascade(&self, timeline: &[TimelineEvent]) -> CascadeAnalysis {
        let mut cascade = CascadeAnalysis::default();
        let groups = group_by_service(timeline);

        for (service, errors) in &groups {
            let Some(service) = service else { continue };
            // Timeline is sorted, so the first entry is this service's
            // earliest error.
            let first = errors[0];
            for downstream in self.catalog.downstream_of(service) {
                let Some((_, downstream_errors)) =
                    groups.iter().find(|(s, _)| s.as_ref() == Some(&downstream))
                else {
                    continue;
                };
                for error in downstream_errors {
                    if error.timestamp > first.timestamp {
                        cascade.detected = true;
                        if cascade.origin.is_none() {
                            cascade.origin = Some(service.clone());
                        }
                        cascade.chain.push(CascadeEdge {
                            from: service.clone(),
                            to: downstream.clone(),
                        });
                        break;
                    }
                }
            }
        }
        cascade
    }

    fn find_error_origin(
        &self,
        timeline: &[TimelineEvent],
        intent: &IntentSummary,
    ) -> Option<OriginAnalysis> {
        let first = timeline.first()?;
        let confidence = if self.is_upstream_of_intent(first.service.as_ref(), intent) {
            0.85
        } else {
            0.7
        };
        Some(OriginAnalysis {
            service: first.service.clone(),
            timestamp: first.timestamp.clone(),
            confidence,
        })
    }

    fn analyze_dependency_chain(&self, patterns: &[ErrorPattern]) -> DependencyAnalysis {
        let mut analysis = DependencyAnalysis::default();
        let services_with_errors: BTreeSet<ServiceId> =
            patterns.iter().filter_map(|p| p.service.clone()).collect();

        for service in &services_with_errors {
            analysis.affected_services.push(service.clone());
            for dep in self.catalog.upstream_of(service) {
                if services_with_errors.contains(&dep.service) {
                    analysis.upstream_failures.push(UpstreamFailure {
                        service: dep.service.clone(),
                        affected: service.clone(),
                        failure_modes: dep.failure_modes.clone(),
                    });
                }
            }
            for downstream in self.catalog.downstream_of(service) {
                if services_with_errors.contains(&downstream) {
                    analysis.downstream_impact.push(DownstreamImpact {
                        origin: service.clone(),
                        affected: downstream,
                    });
                }
            }
        }
        analysis
    }

    /// Map a record's index/source back to the owning catalog service, or
    /// keep the raw index name if unmapped.
    fn record_service(&self, record: &LogRecord) -> Option<ServiceId> {
        let index = record.source_index()?;
        Some(
            self.catalog
                .owner_of_index(&index)
                .map_or_else(|| ServiceId::new(index.as_str()), |svc| svc.id.clone()),
        )
    }

    /// Whether `service` is a declared direct upstream dependency of any
    /// intent entity.
    fn is_upstream_of_intent(&self, service: Option<&ServiceId>, intent: &IntentSummary) -> bool {
        let Some(service) = service else { return false };
        intent.entities.iter().any(|entity| {
            self.catalog
                .upstream_of(&ServiceId::new(entity.as_str()))
                .iter()
                .any(|dep| &dep.service == service)
        })
    }
}

// Timeline grouping preserves first-appearance order; since the timeline
// is time-sorted, origins are visited earliest-first.
fn group_by_service(timeline: &[TimelineEvent]) -> Vec<(Option<ServiceId>, Vec<&TimelineEvent>)> {
    let mut groups: Vec<(Option<ServiceId>, Vec<&TimelineEvent>)> = Vec::new();
    for event in timeline {
        match groups.iter_mut().find(|(s, _)| *s == event.service) {
            Some((_, events)) => events.push(event),
            None => groups.push((event.service.clone(), vec![event])),
        }
    }
    groups
}

fn rank(
    patterns: &[ErrorPattern],
    cascade: &CascadeAnalysis,
    origin: Option<&OriginAnalysis>,
    dependency: &DependencyAnalysis,
) -> Vec<RootCause> {
    let mut causes = Vec::new();

    if cascade.detected {
        if let Some(origin_service) = &cascade.origin {
            causes.push(RootCause {
                description: format!("Error cascade originated from {origin_service}"),
                confidence: 0.9,
                kind: RootCauseKind::CascadeOrigin,
                service: Some(origin_service.clone()),
                evidence: RootCauseEvidence::Cascade {
                    cascade_chain: cascade.chain.clone(),
                    affected_services: cascade.chain.iter().map(|e| e.to.clone()).collect(),
                },
            });
        }
    }

    for failure in &dependency.upstream_failures {
        causes.push(RootCause {
            description: format!(
                "Upstream service {} failed, affecting {}",
                failure.service, failure.affected
            ),
            confidence: 0.85,
            kind: RootCauseKind::UpstreamFailure,
            service: Some(failure.service.clone()),
            evidence: RootCauseEvidence::Upstream {
                failure_modes: failure.failure_modes.clone(),
                downstream_affected: failure.affected.clone(),
            },
        });
    }

    if let Some(origin) = origin {
        if !cascade.detected {
            causes.push(RootCause {
                description: format!(
                    "Earliest error detected in {}",
                    display_service(origin.service.as_ref())
                ),
                confidence: origin.confidence,
                kind: RootCauseKind::EarliestError,
                service: origin.service.clone(),
                evidence: RootCauseEvidence::Earliest { timestamp: origin.timestamp.clone() },
            });
        }
    }

    for group in top_pattern_groups(patterns) {
        causes.push(RootCause {
            description: format!(
                "Frequent {} errors in {} ({} occurrences)",
                group.category,
                display_service(group.service.as_ref()),
                group.count
            ),
            confidence: frequency_confidence(group.count),
            kind: RootCauseKind::FrequentError,
            service: group.service,
            evidence: RootCauseEvidence::Frequent {
                error_count: group.count,
                samples: group.samples,
            },
        });
    }

    // Stable sort: equal confidence keeps the push order above, which is
    // already the kind priority order.
    causes.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    let mut seen: BTreeSet<Option<ServiceId>> = BTreeSet::new();
    causes.retain(|cause| seen.insert(cause.service.clone()));
    causes.truncate(5);
    causes
}

#[derive(Debug)]
struct PatternGroup {
    service: Option<ServiceId>,
    category: ErrorCategory,
    count: usize,
    samples: Vec<String>,
}

/// The up-to-three highest-occurrence (service, category) groups, ties
/// keeping first appearance. Each group carries at most three value
/// samples clipped to 200 characters.
fn top_pattern_groups(patterns: &[ErrorPattern]) -> Vec<PatternGroup> {
    let mut groups: Vec<PatternGroup> = Vec::new();
    for pattern in patterns {
        let idx = match groups
            .iter()
            .position(|g| g.service == pattern.service && g.category == pattern.category)
        {
            Some(idx) => idx,
            None => {
                groups.push(PatternGroup {
                    service: pattern.service.clone(),
                    category: pattern.category,
                    count: 0,
                    samples: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        group.count += pattern.count;
        if group.samples.len() < 3 {
            group.samples.push(clip(&pattern.value, 200));
        }
    }

    // Stable sort keeps first-appearance order on equal counts.
    groups.sort_by_key(|g| Reverse(g.count));
    groups.truncate(3);
    groups.retain(|g| g.count > 0);
    groups
}

fn frequency_confidence(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let boost = count as f64 * 0.05;
    (0.5 + boost).min(0.8)
}

fn display_service(service: Option<&ServiceId>) -> &str {
    service.map_or("unknown", ServiceId::as_str)
}

fn clip(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
