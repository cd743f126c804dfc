// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Match catalog loading service.

use crate::models::Match;
use std::fs;
use std::path::Path;

/// The static list of matches open for prediction.
///
/// Loaded once at process start; never mutated afterwards.
#[derive(Default, Clone)]
pub struct MatchCatalog {
    matches: Vec<Match>,
}

impl MatchCatalog {
    /// Load the catalog from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::Io(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load the catalog from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let matches: Vec<Match> =
            serde_json::from_str(json_data).map_err(|e| CatalogError::Parse(e.to_string()))?;

        tracing::info!(count = matches.len(), "Loaded match catalog");
        Ok(Self { matches })
    }

    /// Build a catalog from an in-memory list.
    pub fn from_matches(matches: Vec<Match>) -> Self {
        Self { matches }
    }

    /// The full static ordered sequence of matches.
    pub fn list(&self) -> &[Match] {
        &self.matches
    }
}

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
