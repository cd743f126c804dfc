// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prediction submission route.

use axum::{extract::State, response::Redirect, routing::post, Extension, Form, Router};
use serde::Deserialize;
use std::sync::Arc;
use ulid::Ulid;

use crate::error::Result;
use crate::models::{Prediction, User};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/submit-prediction", post(submit_prediction))
}

/// Form body for a prediction submission.
#[derive(Deserialize)]
pub struct PredictionForm {
    #[serde(rename = "matchId")]
    match_id: i64,
    team1_score: i32,
    team2_score: i32,
}

/// Submit a prediction for one match.
///
/// At most one prediction exists per (user, match): an existing row has
/// its two score fields updated in place, otherwise a new row is inserted
/// with a fresh client-generated id. Store errors propagate to the caller
/// instead of being silently dropped.
async fn submit_prediction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Form(form): Form<PredictionForm>,
) -> Result<Redirect> {
    match state.store.get_prediction(user.id, form.match_id).await? {
        Some(existing) => {
            state
                .store
                .update_prediction_scores(&existing.id, form.team1_score, form.team2_score)
                .await?;

            tracing::info!(
                user_id = user.id,
                match_id = form.match_id,
                "Updated prediction"
            );
        }
        None => {
            let prediction = Prediction {
                id: Ulid::new().to_string(),
                user_id: user.id,
                match_id: form.match_id,
                team1_score: form.team1_score,
                team2_score: form.team2_score,
            };

            state.store.insert_prediction(&prediction).await?;

            tracing::info!(
                user_id = user.id,
                match_id = form.match_id,
                "Created prediction"
            );
        }
    }

    Ok(Redirect::to("/profile"))
}
