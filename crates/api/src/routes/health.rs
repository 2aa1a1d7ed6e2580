use axum::extract::State;
use axum::{routing::get, Json, Router};
use mde_core::format::MetadataFormat;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when any check fails.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the resource store answers queries.
    pub db_healthy: bool,
    /// Whether every export stylesheet is present on disk.
    pub stylesheets_present: bool,
}

/// GET /health -- store reachability and stylesheet availability.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = state.store.health_check().await.is_ok();

    let mut stylesheets_present = true;
    for format in MetadataFormat::ALL {
        let path = state.pipeline.transformer.stylesheet_path(format);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::warn!(path = %path.display(), "Stylesheet missing");
            stylesheets_present = false;
        }
    }

    let status = if db_healthy && stylesheets_present {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        stylesheets_present,
    })
}

/// Mount health check routes (root level, outside `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
