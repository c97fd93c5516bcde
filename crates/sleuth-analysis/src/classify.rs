//! Shared error classification: the error predicate, category rules, and
//! the keyword/code vocabulary used for error signatures.
//!
//! The predicate in [`is_error_record`] is used identically by the
//! correlation engine and the root-cause ranker; keeping it in one place is
//! what guarantees that.

use std::sync::OnceLock;

use regex::Regex;

use sleuth_core::enums::ErrorCategory;
use sleuth_core::record::LogRecord;

/// Level values that classify a record as an error outright.
pub const ERROR_LEVELS: [&str; 3] = ["error", "fatal", "critical"];

/// Lexical markers that classify free text as an error.
pub const ERROR_TEXT_MARKERS: [&str; 5] = ["error", "exception", "failed", "failure", "timeout"];

/// Keyword vocabulary for error signatures, in extraction order.
pub const ERROR_KEYWORDS: [&str; 14] = [
    "timeout",
    "connection refused",
    "null pointer",
    "out of memory",
    "permission denied",
    "not found",
    "invalid",
    "failed",
    "exception",
    "error",
    "fatal",
    "critical",
    "unauthorized",
    "forbidden",
];

fn error_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[45]\d{2}\b").expect("hardcoded regex compiles"))
}

/// Whether a record represents an error.
///
/// True when the level field (with its aliases) is one of
/// [`ERROR_LEVELS`], or the raw/message text contains any of
/// [`ERROR_TEXT_MARKERS`]. Case-insensitive on both sides.
#[must_use]
pub fn is_error_record(record: &LogRecord) -> bool {
    if let Some(level) = record.level() {
        let level = level.to_lowercase();
        if ERROR_LEVELS.contains(&level.as_str()) {
            return true;
        }
    }
    if let Some(raw) = record.raw_text() {
        let raw = raw.to_lowercase();
        if ERROR_TEXT_MARKERS.iter().any(|m| raw.contains(m)) {
            return true;
        }
    }
    false
}

/// Classify an error message into a coarse category.
///
/// Rules are checked in the declaration order of [`ErrorCategory`]; the
/// first matching rule wins, so "connection timeout" grades as `Timeout`.
#[must_use]
pub fn categorize(text: &str) -> ErrorCategory {
    let text = text.to_lowercase();
    let contains_any = |needles: &[&str]| needles.iter().any(|n| text.contains(n));

    if contains_any(&["timeout", "timed out", "deadline exceeded"]) {
        ErrorCategory::Timeout
    } else if contains_any(&["connection refused", "connect error", "network"]) {
        ErrorCategory::ConnectionError
    } else if contains_any(&["500", "502", "503", "504", "5xx", "internal server"]) {
        ErrorCategory::ServerError5xx
    } else if contains_any(&["404", "not found"]) {
        ErrorCategory::NotFound
    } else if contains_any(&["401", "403", "unauthorized", "forbidden", "auth"]) {
        ErrorCategory::AuthError
    } else if contains_any(&["null", "undefined", "none", "nullpointer"]) {
        ErrorCategory::NullReference
    } else if contains_any(&["exception", "error", "failed", "failure"]) {
        ErrorCategory::GeneralError
    } else {
        ErrorCategory::Unknown
    }
}

/// Every vocabulary keyword present in `text`, in vocabulary order.
#[must_use]
pub fn extract_error_keywords(text: &str) -> Vec<String> {
    let text = text.to_lowercase();
    ERROR_KEYWORDS
        .iter()
        .filter(|kw| text.contains(*kw))
        .map(|kw| (*kw).to_string())
        .collect()
}

/// HTTP 4xx/5xx status codes found in `text`, sorted and deduplicated.
#[must_use]
pub fn extract_error_codes(text: &str) -> Vec<String> {
    let mut codes: Vec<String> = error_code_re()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    codes.sort();
    codes.dedup();
    codes
}
