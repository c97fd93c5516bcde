//! Raw log records and query result batches.
//!
//! A [`LogRecord`] is one row returned by the log store: an open map of
//! field names to JSON values. Accessors cover the well-known field
//! aliases so the analysis crates never hardcode them twice.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw log event, keyed by field name.
///
/// Field sets vary per source, so this stays an open map rather than a
/// struct. Scalar lookups go through [`LogRecord::text`], which stringifies
/// numbers and booleans the way the rest of the pipeline expects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(transparent)]
pub struct LogRecord {
    pub fields: Map<String, Value>,
}

impl LogRecord {
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Insert a field, replacing any previous value under the same name.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up a field and render scalar values as text.
    ///
    /// Strings come back as-is, numbers and booleans via their canonical
    /// display form. Nulls, arrays, and objects yield `None`.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// The free-text payload: `_raw`, falling back to `message`.
    #[must_use]
    pub fn raw_text(&self) -> Option<String> {
        self.text("_raw").or_else(|| self.text("message"))
    }

    /// The event timestamp as text: `time`, then `_time`, then `timestamp`.
    #[must_use]
    pub fn timestamp_text(&self) -> Option<String> {
        self.text("time")
            .or_else(|| self.text("_time"))
            .or_else(|| self.text("timestamp"))
    }

    /// The log level: `level`, falling back to `log_level`.
    #[must_use]
    pub fn level(&self) -> Option<String> {
        self.text("level").or_else(|| self.text("log_level"))
    }

    /// The index (or source) the record came from.
    #[must_use]
    pub fn source_index(&self) -> Option<String> {
        self.text("index").or_else(|| self.text("source"))
    }
}

impl From<Map<String, Value>> for LogRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl FromIterator<(String, Value)> for LogRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

/// The result of executing one query against the log store.
///
/// `total_count` is the store's count, which may exceed `records.len()`
/// when the store truncates large result sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct QueryBatch {
    pub records: Vec<LogRecord>,
    pub total_count: usize,
    pub fields: Vec<String>,
}

impl QueryBatch {
    /// The degraded substitute for a failed query: zero records, zero count.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(records: Vec<LogRecord>) -> Self {
        let total_count = records.len();
        Self { records, total_count, fields: Vec::new() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> LogRecord {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect()
    }

    #[test]
    fn text_stringifies_scalars() {
        let rec = record(&[
            ("message", json!("db timeout")),
            ("status", json!(503)),
            ("retried", json!(true)),
            ("extra", json!(null)),
            ("tags", json!(["a", "b"])),
        ]);
        assert_eq!(rec.text("message").as_deref(), Some("db timeout"));
        assert_eq!(rec.text("status").as_deref(), Some("503"));
        assert_eq!(rec.text("retried").as_deref(), Some("true"));
        assert_eq!(rec.text("extra"), None);
        assert_eq!(rec.text("tags"), None);
        assert_eq!(rec.text("missing"), None);
    }

    #[test]
    fn alias_fallbacks_resolve_in_order() {
        let rec = record(&[("_raw", json!("raw wins")), ("message", json!("fallback"))]);
        assert_eq!(rec.raw_text().as_deref(), Some("raw wins"));

        let rec = record(&[("message", json!("fallback"))]);
        assert_eq!(rec.raw_text().as_deref(), Some("fallback"));

        let rec = record(&[
            ("_time", json!("2026-01-09T10:00:00")),
            ("timestamp", json!("2026-01-09T11:00:00")),
        ]);
        assert_eq!(rec.timestamp_text().as_deref(), Some("2026-01-09T10:00:00"));

        let rec = record(&[("log_level", json!("ERROR"))]);
        assert_eq!(rec.level().as_deref(), Some("ERROR"));

        let rec = record(&[("source", json!("app_logs"))]);
        assert_eq!(rec.source_index().as_deref(), Some("app_logs"));
    }

    #[test]
    fn record_roundtrips_as_plain_object() {
        let rec = record(&[("level", json!("error")), ("status", json!(500))]);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json, json!({"level": "error", "status": 500}));
        let back: LogRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn empty_batch_is_the_degraded_substitute() {
        let batch = QueryBatch::empty();
        assert!(batch.is_empty());
        assert_eq!(batch.total_count, 0);
        assert!(batch.fields.is_empty());
    }
}
