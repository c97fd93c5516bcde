//! Categories, significance grades, and confidence levels for Sleuth.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! String forms returned by `as_str()` are the ones that appear in rendered
//! answers and JSONL snapshots, so they are stable.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Criticality
// ---------------------------------------------------------------------------

/// Business criticality of a service, as declared in the service catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    Critical,
    High,
    Medium,
    Low,
    #[default]
    Unspecified,
}

impl Criticality {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Significance
// ---------------------------------------------------------------------------

/// Significance grade of a finding or an evidence item.
///
/// `High` findings are the ones that trigger upstream tracing; everything
/// below that keeps the investigation alive without widening it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    High,
    Medium,
}

impl Significance {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConfidenceLevel
// ---------------------------------------------------------------------------

/// Qualitative confidence band derived from the numeric confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl ConfidenceLevel {
    /// Map a score in `[0.0, 1.0]` onto its band.
    ///
    /// Thresholds are checked in descending order: `0.85`, `0.70`, `0.50`,
    /// `0.30`, with everything below `0.30` grading as `VeryLow`.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            Self::VeryHigh
        } else if score >= 0.70 {
            Self::High
        } else if score >= 0.50 {
            Self::Medium
        } else if score >= 0.30 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryHigh => "very_high",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::VeryLow => "very_low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ErrorCategory
// ---------------------------------------------------------------------------

/// Coarse classification of an error message.
///
/// Categorization is first-match-wins in the declaration order below, so
/// `"connection timeout"` grades as `Timeout`, not `ConnectionError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Timeout,
    ConnectionError,
    #[serde(rename = "server_error_5xx")]
    ServerError5xx,
    NotFound,
    AuthError,
    NullReference,
    GeneralError,
    Unknown,
}

impl ErrorCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ConnectionError => "connection_error",
            Self::ServerError5xx => "server_error_5xx",
            Self::NotFound => "not_found",
            Self::AuthError => "auth_error",
            Self::NullReference => "null_reference",
            Self::GeneralError => "general_error",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RootCauseKind
// ---------------------------------------------------------------------------

/// How a root cause candidate was identified.
///
/// Declaration order doubles as priority order: when two candidates carry the
/// same confidence, the one whose kind appears earlier here was pushed first
/// and a stable sort keeps it ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RootCauseKind {
    CascadeOrigin,
    UpstreamFailure,
    EarliestError,
    FrequentError,
}

impl RootCauseKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CascadeOrigin => "cascade_origin",
            Self::UpstreamFailure => "upstream_failure",
            Self::EarliestError => "earliest_error",
            Self::FrequentError => "frequent_error",
        }
    }
}

impl fmt::Display for RootCauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FactorKind
// ---------------------------------------------------------------------------

/// The six weighted factors that make up a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Quality,
    Quantity,
    PatternConsistency,
    ServiceCorrelation,
    TemporalCorrelation,
    HistoricalMatch,
}

impl FactorKind {
    /// All factors, in the order they are reported.
    pub const ALL: [Self; 6] = [
        Self::Quality,
        Self::Quantity,
        Self::PatternConsistency,
        Self::ServiceCorrelation,
        Self::TemporalCorrelation,
        Self::HistoricalMatch,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Quantity => "quantity",
            Self::PatternConsistency => "pattern_consistency",
            Self::ServiceCorrelation => "service_correlation",
            Self::TemporalCorrelation => "temporal_correlation",
            Self::HistoricalMatch => "historical_match",
        }
    }

    /// Human-readable name used in reasoning text ("pattern consistency").
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Quantity => "quantity",
            Self::PatternConsistency => "pattern consistency",
            Self::ServiceCorrelation => "service correlation",
            Self::TemporalCorrelation => "temporal correlation",
            Self::HistoricalMatch => "historical match",
        }
    }

    /// Weight of this factor in the overall score. Weights sum to `1.0`.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Quality => 0.25,
            Self::Quantity => 0.15,
            Self::PatternConsistency => 0.20,
            Self::ServiceCorrelation => 0.15,
            Self::TemporalCorrelation => 0.10,
            Self::HistoricalMatch => 0.15,
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FindingType
// ---------------------------------------------------------------------------

/// Where an evidence item came from: a field/value pattern finding or a raw
/// error sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FindingType {
    Pattern,
    ErrorSample,
}

impl FindingType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::ErrorSample => "error_sample",
        }
    }
}

impl fmt::Display for FindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EvidenceImpact
// ---------------------------------------------------------------------------

/// Whether a factor's supporting evidence pushed the score up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceImpact {
    Positive,
    Neutral,
    Negative,
}

impl EvidenceImpact {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for EvidenceImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
