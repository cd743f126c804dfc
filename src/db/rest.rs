// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User store client wrapper with typed operations.
//!
//! Talks to the remote data service's PostgREST-style interface:
//! - `GET  {base}/rest/v1/{table}?col=eq.{v}` returns a JSON array of rows
//! - `POST {base}/rest/v1/{table}` inserts; `Prefer: return=representation`
//!   echoes the inserted row with store-generated columns filled in
//! - `PATCH {base}/rest/v1/{table}?id=eq.{v}` updates the matched rows
//!
//! Lookups return `Ok(None)` when the result set is empty. An empty result
//! is the store's not-found signal; it is never reported as an error.

use crate::db::tables;
use crate::error::AppError;
use crate::models::{NewUser, Prediction, User};
use serde::de::DeserializeOwned;

/// User store client.
#[derive(Clone)]
pub struct RestStore {
    inner: Option<RestInner>,
}

#[derive(Clone)]
struct RestInner {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    /// Create a new store client for the given service URL and API key.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            inner: Some(RestInner {
                http: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key: api_key.to_string(),
            }),
        }
    }

    /// Create a mock store client for testing (offline mode).
    ///
    /// All store operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { inner: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_inner(&self) -> Result<&RestInner, AppError> {
        self.inner
            .as_ref()
            .ok_or_else(|| AppError::Store("Store not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by primary key.
    pub async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        self.select_one(tables::USERS, &[("id", format!("eq.{}", id))])
            .await
    }

    /// Get a user by the identity provider's stable identifier.
    pub async fn get_user_by_google_id(&self, google_id: &str) -> Result<Option<User>, AppError> {
        self.select_one(
            tables::USERS,
            &[("google_id", format!("eq.{}", google_id))],
        )
        .await
    }

    /// Insert a new user and return the stored row.
    ///
    /// The store assigns the primary key; the returned row carries it.
    pub async fn insert_user(&self, user: &NewUser) -> Result<User, AppError> {
        let inner = self.get_inner()?;

        let response = inner
            .request(reqwest::Method::POST, tables::USERS)
            .header("Prefer", "return=representation")
            .json(user)
            .send()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        let rows: Vec<User> = check_response_json(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Store("insert into users returned no row".to_string()))
    }

    // ─── Prediction Operations ───────────────────────────────────

    /// Get a user's prediction for one match, if any.
    pub async fn get_prediction(
        &self,
        user_id: i64,
        match_id: i64,
    ) -> Result<Option<Prediction>, AppError> {
        self.select_one(
            tables::PREDICTIONS,
            &[
                ("user_id", format!("eq.{}", user_id)),
                ("match_id", format!("eq.{}", match_id)),
            ],
        )
        .await
    }

    /// Get all predictions belonging to a user, ordered by match.
    pub async fn get_predictions_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Prediction>, AppError> {
        self.select(
            tables::PREDICTIONS,
            &[
                ("user_id", format!("eq.{}", user_id)),
                ("order", "match_id.asc".to_string()),
            ],
        )
        .await
    }

    /// Insert a new prediction row.
    pub async fn insert_prediction(&self, prediction: &Prediction) -> Result<(), AppError> {
        let inner = self.get_inner()?;

        let response = inner
            .request(reqwest::Method::POST, tables::PREDICTIONS)
            .header("Prefer", "return=minimal")
            .json(prediction)
            .send()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        check_response(response).await
    }

    /// Update the two score fields of an existing prediction in place.
    pub async fn update_prediction_scores(
        &self,
        id: &str,
        team1_score: i32,
        team2_score: i32,
    ) -> Result<(), AppError> {
        let inner = self.get_inner()?;

        let body = serde_json::json!({
            "team1_score": team1_score,
            "team2_score": team2_score,
        });

        let response = inner
            .request(reqwest::Method::PATCH, tables::PREDICTIONS)
            .query(&[("id", format!("eq.{}", id))])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        check_response(response).await
    }

    // ─── Generic Select Helpers ──────────────────────────────────

    /// Select rows matching the given filters.
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, AppError> {
        let inner = self.get_inner()?;

        let response = inner
            .request(reqwest::Method::GET, table)
            .query(filters)
            .send()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        check_response_json(response).await
    }

    /// Select at most one row matching the given filters.
    ///
    /// An empty result set is `Ok(None)`.
    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Option<T>, AppError> {
        let mut filters: Vec<(&str, String)> = filters.to_vec();
        filters.push(("limit", "1".to_string()));

        let rows: Vec<T> = self.select(table, &filters).await?;
        Ok(rows.into_iter().next())
    }
}

impl RestInner {
    /// Build a request for a table endpoint with the service auth headers.
    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

/// Check response status and return an error if not successful.
async fn check_response(response: reqwest::Response) -> Result<(), AppError> {
    if response.status().is_success() {
        return Ok(());
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(AppError::Store(format!("HTTP {}: {}", status, body)))
}

/// Check response and parse the JSON body.
async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Store(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Store(format!("JSON parse error: {}", e)))
}
