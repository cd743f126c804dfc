//! User store layer (remote REST data service).

pub mod rest;

pub use rest::RestStore;

/// Table names as constants.
pub mod tables {
    pub const USERS: &str = "users";
    pub const PREDICTIONS: &str = "predictions";
}
