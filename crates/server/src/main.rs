//! sitelens-server: HTTP front end for the web-page analyzer.
//!
//! Serves the login and analyze pages, issues session cookies, and exposes
//! the analysis pipeline at `POST /api/analyze`. The port comes from the
//! `PORT` environment variable (default 8080).

mod auth;
mod routes;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sitelens_core::Analyzer;

use crate::routes::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let analyzer = match Analyzer::new() {
        Ok(analyzer) => analyzer,
        Err(e) => {
            error!(error = %e, "failed to construct analyzer");
            std::process::exit(1);
        }
    };

    let app = routes::router(AppState::new(analyzer));

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(port, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(port, "server started");
    if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
    info!("server stopped gracefully");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
