// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Matchday: score predictions for football matches.
//!
//! This crate provides the web application for logging in with Google
//! and submitting score predictions, backed by a remote user store.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::RestStore;
use services::{GoogleClient, MatchCatalog};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: RestStore,
    pub catalog: MatchCatalog,
    pub google: GoogleClient,
}
