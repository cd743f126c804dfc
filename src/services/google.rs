// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth2 client for the identity round trip.
//!
//! Handles:
//! - Authorization URL construction for the browser redirect
//! - Authorization-code exchange
//! - Userinfo fetch (stable provider id + display name)

use crate::error::AppError;
use serde::Deserialize;

const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Google OAuth2 client.
#[derive(Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    auth_url: String,
    token_url: String,
    userinfo_url: String,
    client_id: String,
    client_secret: String,
    redirect_url: String,
}

impl GoogleClient {
    /// Create a new client with OAuth credentials against the live endpoints.
    pub fn new(client_id: String, client_secret: String, redirect_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            userinfo_url: DEFAULT_USERINFO_URL.to_string(),
            client_id,
            client_secret,
            redirect_url,
        }
    }

    /// Create a client against alternate endpoints.
    ///
    /// This is intended for deterministic local/integration tests.
    pub fn with_endpoints(
        client_id: String,
        client_secret: String,
        redirect_url: String,
        auth_url: String,
        token_url: String,
        userinfo_url: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth_url,
            token_url,
            userinfo_url,
            client_id,
            client_secret,
            redirect_url,
        }
    }

    /// Build the authorization URL the browser is redirected to.
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope=openid%20profile&state={}",
            self.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_url),
            state
        )
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Identity(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Google token exchange failed");
            return Err(AppError::Identity(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Identity(format!("Failed to parse token response: {}", e)))
    }

    /// Fetch the authenticated user's identity document.
    pub async fn fetch_identity(&self, access_token: &str) -> Result<GoogleIdentity, AppError> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Identity(format!("Userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Identity(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Identity(format!("Failed to parse userinfo: {}", e)))
    }
}

/// Token exchange response from Google.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Identity document returned by the userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleIdentity {
    /// Stable provider-assigned identifier
    pub id: String,
    /// Display name
    pub name: String,
}
