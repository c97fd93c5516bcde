use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ConfidenceLevel, EvidenceImpact, FactorKind};

/// One scored factor: raw score, its fixed weight, the weighted
/// contribution, and the detail lines explaining the score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Factor {
    pub score: f64,
    pub weight: f64,
    pub weighted: f64,
    pub findings: Vec<String>,
}

impl Factor {
    #[must_use]
    pub fn new(kind: FactorKind, score: f64, findings: Vec<String>) -> Self {
        let weight = kind.weight();
        Self { score, weight, weighted: score * weight, findings }
    }

    /// A zero-score factor carrying its weight, used before scoring runs.
    #[must_use]
    pub fn zero(kind: FactorKind) -> Self {
        Self::new(kind, 0.0, Vec::new())
    }
}

/// The six named factors of a confidence computation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ConfidenceFactors {
    pub quality: Factor,
    pub quantity: Factor,
    pub pattern_consistency: Factor,
    pub service_correlation: Factor,
    pub temporal_correlation: Factor,
    pub historical_match: Factor,
}

impl ConfidenceFactors {
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            quality: Factor::zero(FactorKind::Quality),
            quantity: Factor::zero(FactorKind::Quantity),
            pattern_consistency: Factor::zero(FactorKind::PatternConsistency),
            service_correlation: Factor::zero(FactorKind::ServiceCorrelation),
            temporal_correlation: Factor::zero(FactorKind::TemporalCorrelation),
            historical_match: Factor::zero(FactorKind::HistoricalMatch),
        }
    }

    #[must_use]
    pub fn get(&self, kind: FactorKind) -> &Factor {
        match kind {
            FactorKind::Quality => &self.quality,
            FactorKind::Quantity => &self.quantity,
            FactorKind::PatternConsistency => &self.pattern_consistency,
            FactorKind::ServiceCorrelation => &self.service_correlation,
            FactorKind::TemporalCorrelation => &self.temporal_correlation,
            FactorKind::HistoricalMatch => &self.historical_match,
        }
    }

    /// Iterate factors in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (FactorKind, &Factor)> {
        FactorKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Sum of weighted contributions, before clamping and rounding.
    #[must_use]
    pub fn weighted_total(&self) -> f64 {
        self.iter().map(|(_, f)| f.weighted).sum()
    }
}

/// A supporting-evidence entry attached to the confidence result: one
/// factor finding line and whether it pushed the score up or down.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SupportingEvidence {
    #[serde(rename = "type")]
    pub kind: FactorKind,
    pub finding: String,
    pub impact: EvidenceImpact,
}

/// The confidence scorer's full output.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ConfidenceReport {
    pub score: f64,
    pub level: ConfidenceLevel,
    pub factors: ConfidenceFactors,
    pub supporting_evidence: Vec<SupportingEvidence>,
    pub reasoning: String,
}

impl ConfidenceReport {
    /// A zero-confidence report, used when an investigation never reaches
    /// the scoring phase.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            level: ConfidenceLevel::VeryLow,
            factors: ConfidenceFactors::zeroed(),
            supporting_evidence: Vec::new(),
            reasoning: String::new(),
        }
    }
}
