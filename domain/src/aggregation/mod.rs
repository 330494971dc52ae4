//! Aggregation subdomain: ranking, grouping and summarizing model results.
//!
//! - [`quality`] - per-response quality heuristic
//! - [`grouping`] - greedy, seed-first length-similarity groups
//! - [`confidence`] - overall trust estimate for the consensus
//! - [`shape`] - structural checks for untyped result lists
//! - [`aggregator`] - the full reduction into an [`AggregatedResponse`](aggregator::AggregatedResponse)

pub mod aggregator;
pub mod confidence;
pub mod grouping;
pub mod policy;
pub mod quality;
pub mod shape;
