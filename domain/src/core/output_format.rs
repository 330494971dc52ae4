//! Output format value object

use serde::{Deserialize, Serialize};

/// How an ensemble run is reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every model's response followed by the aggregate report
    Full,
    /// Only the best response and its confidence
    #[default]
    Best,
    /// Machine-readable JSON
    Json,
}
