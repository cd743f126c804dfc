//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google OAuth client ID (public)
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Callback URL registered with the identity provider
    pub oauth_callback_url: String,
    /// Session token signing key (raw bytes)
    pub session_secret: Vec<u8>,
    /// Base URL of the user store's REST interface
    pub store_url: String,
    /// API key for the user store
    pub store_api_key: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_SECRET"))?,
            oauth_callback_url: env::var("OAUTH_CALLBACK_URL")
                .unwrap_or_else(|_| "http://localhost:3000/auth/callback".to_string()),
            session_secret: env::var("SESSION_SECRET")
                .map_err(|_| ConfigError::Missing("SESSION_SECRET"))?
                .into_bytes(),
            store_url: env::var("STORE_URL").map_err(|_| ConfigError::Missing("STORE_URL"))?,
            store_api_key: env::var("STORE_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STORE_API_KEY"))?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            google_client_id: "test_client_id".to_string(),
            google_client_secret: "test_secret".to_string(),
            oauth_callback_url: "http://localhost:3000/auth/callback".to_string(),
            session_secret: b"test_session_key_32_bytes_min!!".to_vec(),
            store_url: "http://localhost:54321".to_string(),
            store_api_key: "test_store_key".to_string(),
            port: 3000,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
