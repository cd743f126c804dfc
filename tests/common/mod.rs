// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test fixtures: the app under test wired against in-process
//! stub servers for the user store and the identity provider.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use matchday::config::Config;
use matchday::db::RestStore;
use matchday::models::{Match, Prediction, User};
use matchday::routes::create_router;
use matchday::services::{GoogleClient, MatchCatalog};
use matchday::AppState;

// ─── Stub User Store ─────────────────────────────────────────────

/// In-memory stand-in for the remote data service, speaking the same
/// REST dialect the application consumes.
pub struct StubStore {
    pub data: Mutex<StoreData>,
    /// Total requests observed, including failed ones.
    pub hits: AtomicUsize,
    /// When set, every request answers 500.
    pub fail: AtomicBool,
    /// When set, only the predictions table answers 500.
    pub fail_predictions: AtomicBool,
}

#[derive(Default)]
pub struct StoreData {
    pub users: Vec<User>,
    pub predictions: Vec<Prediction>,
    next_user_id: i64,
}

impl StubStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            data: Mutex::new(StoreData::default()),
            hits: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            fail_predictions: AtomicBool::new(false),
        })
    }

    /// Seed a user row, returning it with its assigned id.
    #[allow(dead_code)]
    pub fn seed_user(&self, google_id: &str, display_name: &str) -> User {
        let mut data = self.data.lock().unwrap();
        data.next_user_id += 1;
        let user = User {
            id: data.next_user_id,
            google_id: google_id.to_string(),
            display_name: display_name.to_string(),
        };
        data.users.push(user.clone());
        user
    }

    #[allow(dead_code)]
    pub fn user_count(&self) -> usize {
        self.data.lock().unwrap().users.len()
    }

    #[allow(dead_code)]
    pub fn predictions_for(&self, user_id: i64) -> Vec<Prediction> {
        self.data
            .lock()
            .unwrap()
            .predictions
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect()
    }

    #[allow(dead_code)]
    pub fn request_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    /// Fail predictions-table requests only; user lookups keep working.
    #[allow(dead_code)]
    pub fn set_failing_predictions(&self, failing: bool) {
        self.fail_predictions.store(failing, Ordering::SeqCst);
    }

    /// Seed a prediction row directly.
    #[allow(dead_code)]
    pub fn seed_prediction(&self, prediction: Prediction) {
        self.data.lock().unwrap().predictions.push(prediction);
    }

    fn check(&self) -> Result<(), Response> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "stub store failure").into_response());
        }
        Ok(())
    }

    fn check_predictions(&self) -> Result<(), Response> {
        self.check()?;
        if self.fail_predictions.load(Ordering::SeqCst) {
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "stub store failure").into_response());
        }
        Ok(())
    }
}

fn store_router(store: &Arc<StubStore>) -> Router {
    Router::new()
        .route("/rest/v1/users", get(select_users).post(insert_user))
        .route(
            "/rest/v1/predictions",
            get(select_predictions)
                .post(insert_prediction)
                .patch(update_prediction),
        )
        .with_state(store.clone())
}

/// Strip a PostgREST-style `eq.` filter value.
fn eq_filter<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.strip_prefix("eq."))
}

async fn select_users(
    State(store): State<Arc<StubStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = store.check() {
        return resp;
    }

    let data = store.data.lock().unwrap();
    let rows: Vec<User> = data
        .users
        .iter()
        .filter(|u| eq_filter(&params, "id").is_none_or(|v| u.id.to_string() == v))
        .filter(|u| eq_filter(&params, "google_id").is_none_or(|v| u.google_id == v))
        .cloned()
        .collect();

    Json(rows).into_response()
}

async fn insert_user(
    State(store): State<Arc<StubStore>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if let Err(resp) = store.check() {
        return resp;
    }

    let mut data = store.data.lock().unwrap();
    data.next_user_id += 1;
    let user = User {
        id: data.next_user_id,
        google_id: body["google_id"].as_str().unwrap_or_default().to_string(),
        display_name: body["display_name"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
    };
    data.users.push(user.clone());

    // Prefer: return=representation echoes the inserted row
    (StatusCode::CREATED, Json(vec![user])).into_response()
}

async fn select_predictions(
    State(store): State<Arc<StubStore>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = store.check_predictions() {
        return resp;
    }

    let data = store.data.lock().unwrap();
    let mut rows: Vec<Prediction> = data
        .predictions
        .iter()
        .filter(|p| eq_filter(&params, "user_id").is_none_or(|v| p.user_id.to_string() == v))
        .filter(|p| eq_filter(&params, "match_id").is_none_or(|v| p.match_id.to_string() == v))
        .cloned()
        .collect();
    rows.sort_by_key(|p| p.match_id);

    Json(rows).into_response()
}

async fn insert_prediction(
    State(store): State<Arc<StubStore>>,
    Json(prediction): Json<Prediction>,
) -> Response {
    if let Err(resp) = store.check_predictions() {
        return resp;
    }

    store.data.lock().unwrap().predictions.push(prediction);

    // Prefer: return=minimal
    StatusCode::CREATED.into_response()
}

async fn update_prediction(
    State(store): State<Arc<StubStore>>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if let Err(resp) = store.check_predictions() {
        return resp;
    }

    let Some(id) = eq_filter(&params, "id") else {
        return (StatusCode::BAD_REQUEST, "missing id filter").into_response();
    };

    let mut data = store.data.lock().unwrap();
    for p in data.predictions.iter_mut().filter(|p| p.id == id) {
        if let Some(score) = body["team1_score"].as_i64() {
            p.team1_score = score as i32;
        }
        if let Some(score) = body["team2_score"].as_i64() {
            p.team2_score = score as i32;
        }
    }

    StatusCode::NO_CONTENT.into_response()
}

// ─── Stub Identity Provider ──────────────────────────────────────

/// Stand-in for the OAuth2 identity provider: answers the token
/// exchange and the userinfo fetch with a configurable identity.
pub struct StubIdentity {
    pub identity: Mutex<(String, String)>,
    /// When set, the token exchange answers 500.
    pub fail_exchange: AtomicBool,
}

impl StubIdentity {
    pub fn new(provider_id: &str, name: &str) -> Arc<Self> {
        Arc::new(Self {
            identity: Mutex::new((provider_id.to_string(), name.to_string())),
            fail_exchange: AtomicBool::new(false),
        })
    }

    #[allow(dead_code)]
    pub fn set_identity(&self, provider_id: &str, name: &str) {
        *self.identity.lock().unwrap() = (provider_id.to_string(), name.to_string());
    }

    #[allow(dead_code)]
    pub fn set_fail_exchange(&self, failing: bool) {
        self.fail_exchange.store(failing, Ordering::SeqCst);
    }
}

fn identity_router(identity: &Arc<StubIdentity>) -> Router {
    Router::new()
        .route("/token", post(token_exchange))
        .route("/userinfo", get(userinfo))
        .with_state(identity.clone())
}

async fn token_exchange(State(identity): State<Arc<StubIdentity>>) -> Response {
    if identity.fail_exchange.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "stub exchange failure").into_response();
    }

    Json(json!({
        "access_token": "stub-access-token",
        "token_type": "Bearer",
        "expires_in": 3600,
    }))
    .into_response()
}

async fn userinfo(State(identity): State<Arc<StubIdentity>>) -> Response {
    let (id, name) = identity.identity.lock().unwrap().clone();
    Json(json!({ "id": id, "name": name })).into_response()
}

// ─── Test App Assembly ───────────────────────────────────────────

/// The application under test plus handles to its stub collaborators.
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub store: Arc<StubStore>,
    pub identity: Arc<StubIdentity>,
}

/// Serve a router on an ephemeral local port, returning its base URL.
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });

    format!("http://{}", addr)
}

/// Matches used across the integration tests.
#[allow(dead_code)]
pub fn test_matches() -> Vec<Match> {
    vec![
        Match {
            id: 1,
            team1: "Polska".to_string(),
            team2: "Niemcy".to_string(),
            date: "2024-06-14".to_string(),
            time: "18:00".to_string(),
        },
        Match {
            id: 2,
            team1: "Francja".to_string(),
            team2: "Włochy".to_string(),
            date: "2024-06-15".to_string(),
            time: "21:00".to_string(),
        },
    ]
}

/// Create the app under test with live stub servers.
#[allow(dead_code)]
pub async fn create_test_app() -> TestApp {
    let config = Config::test_default();

    let store_stub = StubStore::new();
    let store_url = spawn_server(store_router(&store_stub)).await;

    let identity_stub = StubIdentity::new("g-42", "Test User");
    let identity_url = spawn_server(identity_router(&identity_stub)).await;

    let store = RestStore::new(&store_url, &config.store_api_key);
    let google = GoogleClient::with_endpoints(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        config.oauth_callback_url.clone(),
        format!("{}/authorize", identity_url),
        format!("{}/token", identity_url),
        format!("{}/userinfo", identity_url),
    );
    let catalog = MatchCatalog::from_matches(test_matches());

    let state = Arc::new(AppState {
        config,
        store,
        catalog,
        google,
    });

    TestApp {
        router: create_router(state.clone()),
        state,
        store: store_stub,
        identity: identity_stub,
    }
}

/// Mint a session cookie header value for a seeded user.
#[allow(dead_code)]
pub fn session_cookie_for(state: &AppState, user_id: i64) -> String {
    let token =
        matchday::middleware::session::create_session_token(user_id, &state.config.session_secret)
            .expect("session token");
    format!(
        "{}={}",
        matchday::middleware::session::SESSION_COOKIE,
        token
    )
}
