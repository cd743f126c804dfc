// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Matchday server
//!
//! Lets users log in with Google and submit score predictions for the
//! matches in the static catalog.

use matchday::{
    config::Config,
    db::RestStore,
    services::{GoogleClient, MatchCatalog},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Matchday");

    // User store client
    let store = RestStore::new(&config.store_url, &config.store_api_key);
    tracing::info!(url = %config.store_url, "User store client initialized");

    // Load the match catalog
    let catalog_path = "data/matches.json";
    tracing::info!(path = catalog_path, "Loading match catalog");
    let catalog =
        MatchCatalog::load_from_file(catalog_path).expect("Failed to load match catalog");
    tracing::info!(count = catalog.list().len(), "Match catalog loaded");

    // Identity provider client
    let google = GoogleClient::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        config.oauth_callback_url.clone(),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        catalog,
        google,
    });

    // Build router
    let app = matchday::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize logging with an environment-driven filter.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("matchday=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
