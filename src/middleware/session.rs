// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session manager: signed-cookie sessions resolved to store-backed users.
//!
//! The session cookie carries an HS256 token whose subject is the user's
//! primary key. On every request the cookie is decoded and the key resolved
//! to a full `User` row via the user store; any failure along the way
//! downgrades the request to anonymous.

use crate::config::Config;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "matchday_session";

/// Session validity, fixed at initialization. Governs both the token
/// expiry claim and the cookie Max-Age.
const SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60; // 30 days

/// Session token claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user primary key)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Create a session token for a user.
pub fn create_session_token(user_id: i64, signing_key: &[u8]) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + SESSION_TTL_SECS as usize,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Whether session cookies should carry the Secure attribute.
///
/// Derived from the deployment scheme: HTTPS callback means HTTPS origin.
pub fn cookie_secure(config: &Config) -> bool {
    config.oauth_callback_url.starts_with("https")
}

/// Build the session cookie written at login.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS))
        .build()
}

/// Build the removal cookie written at logout.
///
/// Attributes must match the creation attributes for browsers to drop it.
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::ZERO)
        .build()
}

/// Resolve the current request's session to a full user row.
///
/// Cookie → token → user id → store lookup, executed once per request.
/// Any failure at any step yields `None` and the request proceeds as
/// anonymous. Requests without a decodable session never reach the store.
pub async fn resolve_session(state: &AppState, jar: &CookieJar) -> Option<User> {
    let token = jar.get(SESSION_COOKIE)?.value().to_string();

    let key = DecodingKey::from_secret(&state.config.session_secret);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(&token, &key, &validation).ok()?;
    let user_id: i64 = token_data.claims.sub.parse().ok()?;

    match state.store.get_user(user_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(
                error = %e,
                user_id,
                "Session user lookup failed, treating request as anonymous"
            );
            None
        }
    }
}

/// Middleware that requires a resolved session.
///
/// Anonymous requests are redirected to the home page; authenticated
/// requests carry the resolved `User` as an extension.
pub async fn require_user(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve_session(&state, &jar).await {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => Redirect::to("/").into_response(),
    }
}
