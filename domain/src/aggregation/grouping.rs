//! Greedy length-similarity grouping.
//!
//! Responses are grouped in a single pass over their existing order:
//! each unclaimed response seeds a group and pulls in every *later*
//! unclaimed response whose length is similar enough to the seed's.
//! Similarity is only ever measured against the seed, so the relation is
//! not transitive: if A~B and B~C but not A~C, then with A as the seed C
//! starts its own group even though B sits between them.

use crate::execution::value_objects::ModelResult;
use serde::{Deserialize, Serialize};

/// A set of responses judged similar by length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseGroup {
    /// Seed first, then admitted members in scan order
    pub members: Vec<ModelResult>,
    /// The seed that anchored the group
    pub representative: ModelResult,
    /// Similarity score that admitted the most recent member (1.0 for a
    /// seed-only group)
    pub similarity: f64,
}

impl ResponseGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn model_ids(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.model_id.as_str())
    }
}

/// `1 - |a - b| / mean(a, b)`; two empty texts are identical.
pub fn length_similarity(a: usize, b: usize) -> f64 {
    let mean = (a + b) as f64 / 2.0;
    if mean == 0.0 {
        return 1.0;
    }
    1.0 - (a as f64 - b as f64).abs() / mean
}

/// Partition `results` into seed-anchored groups.
///
/// Every input lands in exactly one group and groups come out in seed
/// order. A response joins when its similarity to the seed is strictly
/// greater than `threshold`.
pub fn group_by_length(results: &[ModelResult], threshold: f64) -> Vec<ResponseGroup> {
    let lengths: Vec<usize> = results.iter().map(ModelResult::response_chars).collect();
    let mut claimed = vec![false; results.len()];
    let mut groups = Vec::new();

    for seed in 0..results.len() {
        if claimed[seed] {
            continue;
        }
        claimed[seed] = true;

        let mut members = vec![results[seed].clone()];
        let mut similarity = 1.0;

        for candidate in (seed + 1)..results.len() {
            if claimed[candidate] {
                continue;
            }
            let score = length_similarity(lengths[seed], lengths[candidate]);
            if score > threshold {
                claimed[candidate] = true;
                members.push(results[candidate].clone());
                similarity = score;
            }
        }

        groups.push(ResponseGroup {
            representative: results[seed].clone(),
            members,
            similarity,
        });
    }

    groups
}
