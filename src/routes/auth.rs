// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AppError, Result};
use crate::middleware::session::{
    cookie_secure, create_session_token, removal_cookie, resolve_session, session_cookie,
};
use crate::models::NewUser;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/start", get(auth_start))
        .route("/auth/callback", get(auth_callback))
        .route("/logout", get(logout))
}

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Start OAuth flow - redirect to the identity provider.
///
/// An already-authenticated session skips the round trip.
async fn auth_start(State(state): State<Arc<AppState>>, jar: CookieJar) -> Result<Redirect> {
    if resolve_session(&state, &jar).await.is_some() {
        return Ok(Redirect::to("/profile"));
    }

    let oauth_state = create_state(&state.config.session_secret)?;
    let auth_url = state.google.authorize_url(&oauth_state);

    tracing::info!(
        client_id = %state.config.google_client_id,
        "Starting OAuth flow, redirecting to identity provider"
    );

    Ok(Redirect::temporary(&auth_url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - verify state, complete the login, create the session.
///
/// Every failure path logs and redirects home without a session; the
/// handler never surfaces an error status for an authentication failure.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> (CookieJar, Redirect) {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from identity provider");
        return (jar, Redirect::to("/"));
    }

    let state_valid = params
        .state
        .as_deref()
        .map(|s| verify_state(s, &state.config.session_secret))
        .unwrap_or(false);

    if !state_valid {
        tracing::warn!("Invalid or tampered OAuth state parameter");
        return (jar, Redirect::to("/"));
    }

    let Some(code) = params.code else {
        tracing::warn!("OAuth callback without authorization code");
        return (jar, Redirect::to("/"));
    };

    match complete_login(&state, &code).await {
        Ok(token) => {
            let jar = jar.add(session_cookie(token, cookie_secure(&state.config)));
            (jar, Redirect::to("/profile"))
        }
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            (jar, Redirect::to("/"))
        }
    }
}

/// Complete the login: exchange the code, map the returned identity to a
/// local user (creating one on first login), mint the session token.
async fn complete_login(state: &AppState, code: &str) -> Result<String> {
    let token_response = state.google.exchange_code(code).await?;
    let identity = state
        .google
        .fetch_identity(&token_response.access_token)
        .await?;

    let user = match state.store.get_user_by_google_id(&identity.id).await? {
        Some(user) => user,
        None => {
            let created = state
                .store
                .insert_user(&NewUser {
                    google_id: identity.id.clone(),
                    display_name: identity.name.clone(),
                })
                .await?;
            tracing::info!(user_id = created.id, "Created user on first login");
            created
        }
    };

    tracing::info!(
        user_id = user.id,
        display_name = %user.display_name,
        "Login complete"
    );

    create_session_token(user.id, &state.config.session_secret).map_err(AppError::Internal)
}

/// Logout - remove the session cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.add(removal_cookie(cookie_secure(&state.config)));
    (jar, Redirect::to("/"))
}

/// Create the signed OAuth state parameter.
///
/// Format before encoding is "timestamp_hex|signature_hex"; the whole
/// string is base64url-encoded for the URL.
fn create_state(secret: &[u8]) -> Result<String> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis();

    let payload = format!("{:x}", timestamp);

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    let signed_state = format!("{}|{}", payload, hex::encode(signature));

    Ok(URL_SAFE_NO_PAD.encode(signed_state.as_bytes()))
}

/// Verify the HMAC signature on the OAuth state parameter.
fn verify_state(state: &str, secret: &[u8]) -> bool {
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(state) else {
        return false;
    };
    let Ok(state_str) = String::from_utf8(bytes) else {
        return false;
    };

    // Format is "timestamp_hex|signature_hex"
    let parts: Vec<&str> = state_str.splitn(2, '|').collect();
    if parts.len() != 2 {
        return false;
    }

    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(parts[0].as_bytes());

    let expected_signature = hex::encode(mac.finalize().into_bytes());

    if parts[1] != expected_signature {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return false;
    }

    true
}
