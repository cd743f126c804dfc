//! Static match record.

use serde::{Deserialize, Serialize};

/// A match open for prediction.
///
/// Loaded once at startup from the catalog file; never mutated or
/// persisted. Date and time are display strings ("2024-06-14", "18:00").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub team1: String,
    pub team2: String,
    pub date: String,
    pub time: String,
}
