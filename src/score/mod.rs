//! Confidence scoring.
//!
//! Each attempted section gets a score in [0,1] blending field completeness
//! with the strength of the patterns that matched, scaled by boundary
//! clarity (explicit header vs whole-document fallback). Sections that were
//! attempted but produced nothing keep a low, defined score rather than
//! being excluded; the overall score is the arithmetic mean of attempted
//! sections.

use std::collections::BTreeMap;

/// Strength of an explicit labeled pattern match.
pub const STRENGTH_LABELED: f64 = 1.0;
/// Strength of a positional heuristic match.
pub const STRENGTH_POSITIONAL: f64 = 0.6;

/// Score for a section that was attempted but yielded no entries.
pub const ATTEMPTED_EMPTY_SCORE: f64 = 0.05;

const COMPLETENESS_WEIGHT: f64 = 0.6;
const STRENGTH_WEIGHT: f64 = 0.4;
/// Multiplier applied when a section came from a whole-document fallback
/// scan instead of an explicit header.
const FALLBACK_BOUNDARY: f64 = 0.7;

pub struct ConfidenceScorer;

impl ConfidenceScorer {
    /// Scores one section from its extraction signals.
    pub fn section(completeness: f64, pattern_strength: f64, explicit_header: bool) -> f64 {
        let base = COMPLETENESS_WEIGHT * completeness + STRENGTH_WEIGHT * pattern_strength;
        let boundary = if explicit_header { 1.0 } else { FALLBACK_BOUNDARY };
        (base * boundary).clamp(0.0, 1.0)
    }

    /// Score for an attempted section with zero entries.
    pub fn empty_section() -> f64 {
        ATTEMPTED_EMPTY_SCORE
    }

    /// Arithmetic mean of the attempted sections' scores; 0.0 when nothing
    /// was attempted.
    pub fn overall(confidence: &BTreeMap<String, f64>) -> f64 {
        if confidence.is_empty() {
            return 0.0;
        }
        confidence.values().sum::<f64>() / confidence.len() as f64
    }
}
