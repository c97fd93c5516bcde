//! Time window parsing and permissive timestamp parsing.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default lookback when no time range is given.
pub const DEFAULT_LOOKBACK_HOURS: i64 = 24;

/// A half-open investigation window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window, swapping the bounds if they arrive reversed.
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// A window of length `span` ending at `end`.
    #[must_use]
    pub fn ending_at(end: DateTime<Utc>, span: Duration) -> Self {
        Self::new(end - span, end)
    }

    #[must_use]
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Parse a relative time range spec like `"15m"`, `"24h"`, or `"7d"` into a
/// window ending at `now`.
///
/// Anything unparseable (including `None`) falls back to the last 24 hours
/// rather than failing: a bad time range should degrade the window, not the
/// investigation.
#[must_use]
pub fn parse_time_window(spec: Option<&str>, now: DateTime<Utc>) -> TimeWindow {
    let span = spec.and_then(parse_span).unwrap_or_else(|| Duration::hours(DEFAULT_LOOKBACK_HOURS));
    TimeWindow::ending_at(now, span)
}

fn parse_span(spec: &str) -> Option<Duration> {
    let spec = spec.trim();
    let unit = spec.chars().last()?;
    let digits = &spec[..spec.len() - unit.len_utf8()];
    let n: i64 = digits.parse().ok()?;
    if n <= 0 {
        return None;
    }
    match unit {
        'm' => Some(Duration::minutes(n)),
        'h' => Some(Duration::hours(n)),
        'd' => Some(Duration::days(n)),
        _ => None,
    }
}

/// Parse a log timestamp, trying RFC 3339 first and then the common naive
/// forms. Naive timestamps are taken as UTC. Returns `None` when nothing
/// matches; callers treat such records as undated rather than erroring.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    // Last resort: strip sub-second noise or trailing junk and retry on the
    // first 19 chars ("2026-01-09T10:00:00").
    let head = value.get(..19)?;
    NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc())
        .ok()
}
