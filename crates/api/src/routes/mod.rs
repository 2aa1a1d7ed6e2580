pub mod export;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /resources/{id}/export/{scheme}     single schema or envelope (?download=true)
/// /resources/{id}/envelope            envelope, inline
/// /resources/{id}/canonical           canonical document, inline
/// /resources/regenerate               batch regeneration (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/resources", export::router())
}
