//! Handlers for the export endpoints.
//!
//! Each handler validates its input, calls exactly one pipeline operation
//! and turns the returned value into a response. Pipeline failures are
//! mapped to HTTP by [`AppError`](crate::error::AppError).

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mde_core::format::ExportScheme;
use mde_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery};
use crate::response::{inline_xml, xml_download, DataResponse};
use crate::state::AppState;

/// Query parameters for the export endpoint.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Serve the document as an attachment instead of inline.
    #[serde(default)]
    pub download: bool,
}

// ---------------------------------------------------------------------------
// GET /resources/{id}/export/{scheme}
// ---------------------------------------------------------------------------

/// Export one schema (`datacite`, `iso`, `dif`) or the envelope of all
/// three (`all`). The scheme is matched case-insensitively.
pub async fn export_resource(
    State(state): State<AppState>,
    ApiPath((resource_id, scheme)): ApiPath<(DbId, String)>,
    ApiQuery(params): ApiQuery<ExportParams>,
) -> AppResult<Response> {
    let scheme = ExportScheme::parse(&scheme)?;
    let pipeline = &state.pipeline;

    match (scheme, params.download) {
        (ExportScheme::Single(format), false) => {
            let doc = pipeline.transformer.transform(resource_id, format).await?;
            Ok(inline_xml(doc.xml, Some(&doc.record.sha256)))
        }
        (ExportScheme::Single(format), true) => {
            let attachment = pipeline
                .transformer
                .transform_for_download(resource_id, format)
                .await?;
            xml_download(attachment)
        }
        (ExportScheme::All, false) => {
            let envelope = pipeline.composer.compose_all(resource_id).await?;
            Ok(inline_xml(envelope, None))
        }
        (ExportScheme::All, true) => {
            let attachment = pipeline.composer.compose_for_download(resource_id).await?;
            xml_download(attachment)
        }
    }
}

// ---------------------------------------------------------------------------
// GET /resources/{id}/envelope
// ---------------------------------------------------------------------------

/// The combined envelope, inline.
pub async fn get_envelope(
    State(state): State<AppState>,
    ApiPath(resource_id): ApiPath<DbId>,
) -> AppResult<Response> {
    let envelope = state.pipeline.composer.compose_all(resource_id).await?;
    Ok(inline_xml(envelope, None))
}

// ---------------------------------------------------------------------------
// GET /resources/{id}/canonical
// ---------------------------------------------------------------------------

/// The freshly assembled canonical document, inline.
pub async fn get_canonical(
    State(state): State<AppState>,
    ApiPath(resource_id): ApiPath<DbId>,
) -> AppResult<Response> {
    let doc = state.pipeline.assembler.assemble(resource_id).await?;
    Ok(inline_xml(doc.xml, Some(&doc.record.sha256)))
}

// ---------------------------------------------------------------------------
// POST /resources/regenerate
// ---------------------------------------------------------------------------

/// Re-assemble every canonical document. Per-resource failures are
/// reported in the body, not as an error status.
pub async fn regenerate_all(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let report = state.pipeline.regenerate_all().await?;
    Ok(Json(DataResponse { data: report }))
}
