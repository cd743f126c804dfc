//! User model for storage and rendering.

use serde::{Deserialize, Serialize};

/// User row as stored in the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Primary key, generated by the store on insert
    pub id: i64,
    /// Stable identifier assigned by the identity provider
    pub google_id: String,
    /// Display name reported by the identity provider
    pub display_name: String,
}

/// Insert payload for a new user.
///
/// The store generates the primary key; the inserted row is returned
/// with `id` filled in.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub google_id: String,
    pub display_name: String,
}
