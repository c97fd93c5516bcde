//! Serde roundtrip and JsonSchema validation tests for all entity types.

use chrono::Utc;
use schemars::schema_for;
use sleuth_core::entities::*;
use sleuth_core::enums::*;
use sleuth_core::ids::ServiceId;
use sleuth_core::record::{LogRecord, QueryBatch};
use sleuth_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn sample_record() -> LogRecord {
    serde_json::from_value(serde_json::json!({
        "_time": "2026-01-09T10:15:00",
        "_raw": "ERROR payment declined transactionId=tx-123",
        "index": "pay_app",
        "level": "error"
    }))
    .unwrap()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    service_roundtrip,
    Service,
    Service {
        id: ServiceId::new("payment-service"),
        domain: Some("commerce".into()),
        tier: Some("backend".into()),
        criticality: Criticality::Critical,
        upstream: vec![UpstreamDependency {
            service: ServiceId::new("auth-service"),
            failure_modes: vec!["timeout".into(), "5xx".into()],
        }],
        indexes: vec!["pay_app".into()],
        apps: vec!["payments".into()],
    }
);

roundtrip_and_validate!(
    hypothesis_roundtrip,
    Hypothesis,
    Hypothesis::new("Check for error logs matching the symptom", 1)
        .with_template("index=* error OR failed OR exception | timechart count")
);

roundtrip_and_validate!(
    finding_roundtrip,
    Finding,
    Finding {
        field: "status".into(),
        value: "503".into(),
        count: 12,
        significance: Significance::High,
        matches_intent: true,
    }
);

roundtrip_and_validate!(
    step_roundtrip,
    InvestigationStep,
    InvestigationStep {
        step_number: 1,
        hypothesis: "Check for error logs matching the symptom".into(),
        query: "index=pay_app level=error".into(),
        summary: "Found 12 results. Key pattern: status=503 (count: 12)".into(),
        findings: vec![Finding {
            field: "status".into(),
            value: "503".into(),
            count: 12,
            significance: Significance::High,
            matches_intent: false,
        }],
        results: QueryBatch::new(vec![sample_record()]),
        timestamp: Utc::now(),
    }
);

roundtrip_and_validate!(
    evidence_item_roundtrip,
    EvidenceItem,
    EvidenceItem {
        source: "Step 1: Check for error logs matching the symptom".into(),
        content: "status=503 (count: 12)".into(),
        relevance: 0.9,
        significance: Significance::High,
        matches_intent: true,
        step_number: 1,
        timestamp: Some("2026-01-09T10:15:00".into()),
        service: Some(ServiceId::new("payment-service")),
        finding_type: Some(FindingType::Pattern),
    }
);

roundtrip_and_validate!(
    root_cause_cascade_roundtrip,
    RootCause,
    RootCause {
        description: "Error cascade originated from auth-service".into(),
        confidence: 0.9,
        kind: RootCauseKind::CascadeOrigin,
        service: Some(ServiceId::new("auth-service")),
        evidence: RootCauseEvidence::Cascade {
            cascade_chain: vec![CascadeEdge {
                from: ServiceId::new("auth-service"),
                to: ServiceId::new("payment-service"),
            }],
            affected_services: vec![ServiceId::new("payment-service")],
        },
    }
);

roundtrip_and_validate!(
    root_cause_frequent_roundtrip,
    RootCause,
    RootCause {
        description: "Frequent timeout errors in payment-service (5 occurrences)".into(),
        confidence: 0.75,
        kind: RootCauseKind::FrequentError,
        service: Some(ServiceId::new("payment-service")),
        evidence: RootCauseEvidence::Frequent {
            error_count: 5,
            samples: vec!["ERROR timeout calling auth".into()],
        },
    }
);

roundtrip_and_validate!(
    error_signature_roundtrip,
    ErrorSignature,
    ErrorSignature {
        service: "pay_app".into(),
        error_keywords: vec!["timeout".into(), "failed".into()],
        error_codes: vec!["503".into()],
    }
);

roundtrip_and_validate!(
    incident_roundtrip,
    Incident,
    Incident {
        id: "inc-a3f8b2c1".into(),
        question: "Why is payment-service failing?".into(),
        answer: "Auth token refresh timed out upstream.".into(),
        resolution: Some("Increased auth client timeout to 5s".into()),
        events: vec![sample_record()],
        occurred_at: Some(Utc::now()),
    }
);

roundtrip_and_validate!(
    correlation_bundle_roundtrip,
    CorrelationBundle,
    {
        let mut bundle = CorrelationBundle::empty();
        bundle.transactions.insert(
            "tx-123".into(),
            vec![TransactionEvent {
                event: sample_record(),
                service: "pay_app".into(),
                timestamp: Some("2026-01-09T10:15:00".into()),
            }],
        );
        bundle.temporal_clusters.push(TemporalCluster {
            anchor_event: sample_record(),
            related_events: vec![RelatedEvent {
                event: sample_record(),
                time_diff_seconds: 30.0,
            }],
        });
        bundle.historical_matches.push(HistoricalMatch {
            signature: ErrorSignature {
                service: "pay_app".into(),
                error_keywords: vec!["timeout".into()],
                error_codes: vec![],
            },
            incident: Incident {
                id: "inc-deadbeef".into(),
                question: "Payment timeouts last week?".into(),
                answer: "Database connection pool exhausted.".into(),
                resolution: None,
                events: vec![],
                occurred_at: None,
            },
            similarity: 0.8,
            resolution: "Database connection pool exhausted.".into(),
        });
        bundle
    }
);

roundtrip_and_validate!(
    confidence_report_roundtrip,
    ConfidenceReport,
    ConfidenceReport {
        score: 0.78,
        level: ConfidenceLevel::High,
        factors: ConfidenceFactors {
            quality: Factor::new(FactorKind::Quality, 0.86, vec!["Average relevance: 0.83".into()]),
            quantity: Factor::new(FactorKind::Quantity, 0.6, vec!["4 evidence items".into()]),
            pattern_consistency: Factor::new(FactorKind::PatternConsistency, 0.9, vec![]),
            service_correlation: Factor::new(FactorKind::ServiceCorrelation, 0.95, vec![]),
            temporal_correlation: Factor::new(FactorKind::TemporalCorrelation, 0.5, vec![]),
            historical_match: Factor::new(FactorKind::HistoricalMatch, 0.5, vec![]),
        },
        supporting_evidence: vec![SupportingEvidence {
            kind: FactorKind::Quality,
            finding: "High average evidence relevance".into(),
            impact: EvidenceImpact::Positive,
        }],
        reasoning: "Confidence is high, driven by service correlation and pattern consistency.".into(),
    }
);

roundtrip_and_validate!(
    intent_summary_roundtrip,
    IntentSummary,
    IntentSummary {
        services: vec!["payment-service".into()],
        indexes: vec![],
        apps: vec![],
        entities: vec!["payment-service".into()],
        symptom_keywords: vec!["timeout".into()],
        query_patterns: vec!["origin".into()],
    }
);

// --- Response types ---

roundtrip_and_validate!(
    investigation_outcome_roundtrip,
    InvestigationOutcome,
    InvestigationOutcome {
        answer: "Auth token refresh timed out upstream.".into(),
        confidence: ConfidenceReport::empty(),
        evidence: vec![],
        steps: vec![],
        root_causes: vec![],
        correlations: CorrelationBundle::empty(),
        requires_user_input: false,
        available_services: vec![ServiceId::new("payment-service")],
        processing_time_ms: 12.5,
        timestamp: Utc::now(),
    }
);

roundtrip_and_validate!(
    service_details_roundtrip,
    ServiceDetails,
    ServiceDetails {
        service: Service {
            id: ServiceId::new("payment-service"),
            domain: None,
            tier: None,
            criticality: Criticality::Unspecified,
            upstream: vec![],
            indexes: vec!["pay_app".into()],
            apps: vec![],
        },
        downstream: vec![ServiceId::new("order-service")],
        upstream_chain: vec![ServiceId::new("payment-service"), ServiceId::new("auth-service")],
        downstream_chain: vec![ServiceId::new("payment-service")],
    }
);

// --- Schema rejection tests ---

#[test]
fn schema_rejects_finding_without_field() {
    let schema = serde_json::to_value(schema_for!(Finding)).unwrap();
    let invalid = serde_json::json!({
        "value": "503",
        "count": 3,
        "significance": "high",
        "matches_intent": false
    });
    let errors = validate_against_schema(&schema, &invalid);
    assert!(!errors.is_empty(), "Should reject finding without 'field'");
}

#[test]
fn schema_rejects_invalid_significance() {
    let schema = serde_json::to_value(schema_for!(Finding)).unwrap();
    let invalid = serde_json::json!({
        "field": "status",
        "value": "503",
        "count": 3,
        "significance": "extreme",
        "matches_intent": false
    });
    let errors = validate_against_schema(&schema, &invalid);
    assert!(!errors.is_empty(), "Should reject invalid significance value");
}
