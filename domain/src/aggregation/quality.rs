//! Heuristic quality score for a single response.
//!
//! The score is a weighted sum of four factors, each in `[0, 1]`:
//!
//! | Factor     | Weight | Source                                  |
//! |------------|--------|-----------------------------------------|
//! | length     | 0.3    | response length in characters           |
//! | latency    | 0.2    | orchestrator-measured latency           |
//! | reputation | 0.3    | catalog category and model size         |
//! | coherence  | 0.2    | sentence count of the response          |
//!
//! Because every factor is bounded by 1.0 and the weights sum to 1.0, the
//! total is always within `[0, 1]`.

use crate::core::model::{GIB, ModelMeta};
use crate::execution::value_objects::ModelResult;
use serde::{Deserialize, Serialize};

pub const LENGTH_WEIGHT: f64 = 0.3;
pub const LATENCY_WEIGHT: f64 = 0.2;
pub const REPUTATION_WEIGHT: f64 = 0.3;
pub const COHERENCE_WEIGHT: f64 = 0.2;

/// Per-factor breakdown of a quality score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityBreakdown {
    pub length: f64,
    pub latency: f64,
    pub reputation: f64,
    pub coherence: f64,
}

impl QualityBreakdown {
    /// Compute every factor for `result`. `meta` is `None` when the catalog
    /// does not know the model.
    pub fn of(result: &ModelResult, meta: Option<&ModelMeta>) -> Self {
        Self {
            length: length_factor(result.response_chars()),
            latency: latency_factor(result.latency_ms),
            reputation: model_reputation(meta),
            coherence: coherence_factor(&result.response_text),
        }
    }

    /// Weighted total.
    pub fn total(&self) -> f64 {
        LENGTH_WEIGHT * self.length
            + LATENCY_WEIGHT * self.latency
            + REPUTATION_WEIGHT * self.reputation
            + COHERENCE_WEIGHT * self.coherence
    }
}

/// Quality score of `result` in `[0, 1]`.
pub fn score_quality(result: &ModelResult, meta: Option<&ModelMeta>) -> f64 {
    QualityBreakdown::of(result, meta).total()
}

pub fn length_factor(chars: usize) -> f64 {
    if chars > 100 {
        1.0
    } else if chars > 50 {
        0.7
    } else {
        0.4
    }
}

pub fn latency_factor(latency_ms: u64) -> f64 {
    if latency_ms < 5_000 {
        1.0
    } else if latency_ms < 10_000 {
        0.7
    } else {
        0.5
    }
}

/// Reputation from catalog metadata: specialists first, then by size.
pub fn model_reputation(meta: Option<&ModelMeta>) -> f64 {
    let Some(meta) = meta else {
        return 0.5;
    };

    if meta.category.is_specialist() {
        0.9
    } else if meta.size_bytes > 5 * GIB {
        0.8
    } else if meta.size_bytes > 3 * GIB {
        0.7
    } else {
        0.6
    }
}

/// Number of non-blank fragments between `.`, `!` and `?`.
pub fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
}

/// Coherence from sentence structure.
///
/// The checks are ordered: sentence count is tested before total length, so
/// a single short sentence scores 0.6 while two short sentences score 0.4.
pub fn coherence_factor(text: &str) -> f64 {
    match sentence_count(text) {
        0 => 0.3,
        1 => 0.6,
        _ if text.chars().count() < 20 => 0.4,
        _ => 1.0,
    }
}
