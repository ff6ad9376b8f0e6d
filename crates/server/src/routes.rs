//! HTTP routes: the analysis API, login, and the static pages.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

use sitelens_core::{Analyzer, is_valid_url};

use crate::auth::{self, LoginService};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub logins: Arc<LoginService>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self { analyzer: Arc::new(analyzer), logins: Arc::new(LoginService::new()) }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
}

/// Static pages live next to the crate, not the process working directory.
fn web_path(file: &str) -> String {
    format!("{}/web/{}", env!("CARGO_MANIFEST_DIR"), file)
}

/// Builds the application router.
///
/// `/` (login page) and `/api/login` are open; the analyze page and the
/// analysis API sit behind the session gate.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/analyze", post(analyze))
        .route_service("/analyze", ServeFile::new(web_path("analyze.html")))
        .route_layer(middleware::from_fn(auth::require_session));

    Router::new()
        .route_service("/", ServeFile::new(web_path("login.html")))
        .route("/api/login", post(login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn analyze(State(state): State<AppState>, Json(req): Json<AnalyzeRequest>) -> Response {
    if req.url.is_empty() || !is_valid_url(&req.url) {
        return (
            StatusCode::BAD_REQUEST,
            "Invalid request: invalid url. It should start with http:// or https://.",
        )
            .into_response();
    }

    match state.analyzer.analyze(&req.url).await {
        Ok(analysis) => Json(analysis).into_response(),
        Err(e) => {
            error!(url = %req.url, error = %e, "analysis failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error processing URL. {}", e)).into_response()
        }
    }
}

async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    if req.username.is_empty() || req.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "Invalid request: both username and password are required",
        )
            .into_response();
    }

    if state.logins.validate_credentials(&req.username, &req.password) {
        info!(username = %req.username, "login succeeded");
        let cookie = auth::session_cookie(&Uuid::new_v4().to_string());
        (
            StatusCode::OK,
            [(SET_COOKIE, cookie)],
            Json(LoginResponse { status: "success" }),
        )
            .into_response()
    } else {
        info!(username = %req.username, "login rejected");
        (StatusCode::UNAUTHORIZED, Json(LoginResponse { status: "unauthorized" })).into_response()
    }
}
