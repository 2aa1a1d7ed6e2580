use axum::routing::{get, post};
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

/// Export routes mounted under `/resources`.
///
/// ```text
/// GET  /{id}/export/{scheme}   -> export_resource
/// GET  /{id}/envelope          -> get_envelope
/// GET  /{id}/canonical         -> get_canonical
/// POST /regenerate             -> regenerate_all
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/export/{scheme}", get(export::export_resource))
        .route("/{id}/envelope", get(export::get_envelope))
        .route("/{id}/canonical", get(export::get_canonical))
        .route("/regenerate", post(export::regenerate_all))
}
