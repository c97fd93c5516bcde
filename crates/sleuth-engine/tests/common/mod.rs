//! Shared fixtures for engine integration tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::json;

use sleuth_catalog::ServiceCatalog;
use sleuth_core::entities::{Service, UpstreamDependency};
use sleuth_core::enums::Criticality;
use sleuth_core::ids::ServiceId;
use sleuth_core::record::LogRecord;
use sleuth_core::timeutil::TimeWindow;

pub fn service(id: &str, upstream: &[(&str, &[&str])], indexes: &[&str]) -> Service {
    Service {
        id: ServiceId::new(id),
        domain: None,
        tier: None,
        criticality: Criticality::Unspecified,
        upstream: upstream
            .iter()
            .map(|(dep, modes)| UpstreamDependency {
                service: ServiceId::new(*dep),
                failure_modes: modes.iter().map(|m| (*m).to_string()).collect(),
            })
            .collect(),
        indexes: indexes.iter().map(|i| (*i).to_string()).collect(),
        apps: Vec::new(),
    }
}

/// checkout depends on payments, payments on ledger-db. The search
/// service has no log indexes, so upstream tracing must skip it.
pub fn catalog() -> Arc<ServiceCatalog> {
    Arc::new(ServiceCatalog::from_services(vec![
        service(
            "checkout",
            &[("payments", &["timeout", "5xx"]), ("search", &[])],
            &["checkout_app"],
        ),
        service("payments", &[("ledger-db", &["timeout"])], &["pay_app"]),
        service("ledger-db", &[], &["ledger_idx"]),
        service("search", &[], &[]),
    ]))
}

pub fn event(index: &str, time: &str, level: &str, raw: &str) -> LogRecord {
    let mut record = LogRecord::new();
    record
        .insert("index", json!(index))
        .insert("time", json!(time))
        .insert("level", json!(level))
        .insert("_raw", json!(raw));
    record
}

/// A payments failure at 10:00 cascading into checkout at 10:00:30, with
/// one transaction id spanning both services.
pub fn cascade_events() -> Vec<LogRecord> {
    vec![
        event(
            "pay_app",
            "2026-01-09T10:00:00Z",
            "error",
            "ERROR payment gateway timeout transactionId=tx-42",
        ),
        event(
            "pay_app",
            "2026-01-09T10:00:10Z",
            "error",
            "ERROR payment gateway timeout",
        ),
        event(
            "checkout_app",
            "2026-01-09T10:00:30Z",
            "error",
            "ERROR checkout failed transactionId=tx-42",
        ),
        event(
            "checkout_app",
            "2026-01-09T10:00:40Z",
            "error",
            "ERROR checkout failed: upstream returned 503",
        ),
        event("checkout_app", "2026-01-09T10:01:00Z", "info", "request completed"),
    ]
}

pub fn window() -> TimeWindow {
    TimeWindow::new(
        Utc.with_ymd_and_hms(2026, 1, 9, 9, 0, 0).single().unwrap(),
        Utc.with_ymd_and_hms(2026, 1, 9, 12, 0, 0).single().unwrap(),
    )
}
