//! Prediction model for storage and rendering.

use serde::{Deserialize, Serialize};

/// Prediction row as stored in the `predictions` table.
///
/// The id is generated client-side (ULID) before insert; the store
/// never assigns one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    /// Owning user (foreign key to `users.id`)
    pub user_id: i64,
    /// Match from the static catalog (not enforced by the store)
    pub match_id: i64,
    pub team1_score: i32,
    pub team2_score: i32,
}
