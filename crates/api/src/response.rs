//! Shared response types for API handlers.

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use mde_pipeline::XmlAttachment;
use serde::Serialize;

use crate::error::{AppError, AppResult};

pub const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";
pub const DOWNLOAD_CONTENT_TYPE: &str = "application/octet-stream";

/// SHA-256 of the persisted artifact a response body was read from.
pub const CONTENT_SHA256: HeaderName = HeaderName::from_static("x-content-sha256");

const CONTENT_TRANSFER_ENCODING: HeaderName =
    HeaderName::from_static("content-transfer-encoding");

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `200` with the XML document as the response body.
pub fn inline_xml(body: String, sha256: Option<&str>) -> Response {
    let mut response = (
        StatusCode::OK,
        [(CONTENT_TYPE, HeaderValue::from_static(XML_CONTENT_TYPE))],
        body,
    )
        .into_response();
    insert_hash(&mut response, sha256);
    response
}

/// `200` with the XML document as a file download.
///
/// The body is fully computed before any header is emitted.
pub fn xml_download(attachment: XmlAttachment) -> AppResult<Response> {
    let disposition =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", attachment.filename))
            .map_err(|e| AppError::InternalError(format!("Invalid download file name: {e}")))?;

    let mut response = (
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static(DOWNLOAD_CONTENT_TYPE)),
            (CONTENT_DISPOSITION, disposition),
            (CONTENT_LENGTH, HeaderValue::from(attachment.body.len())),
            (CONTENT_TRANSFER_ENCODING, HeaderValue::from_static("binary")),
        ],
        attachment.body,
    )
        .into_response();
    insert_hash(&mut response, attachment.sha256.as_deref());
    Ok(response)
}

fn insert_hash(response: &mut Response, sha256: Option<&str>) {
    if let Some(value) = sha256.and_then(|h| HeaderValue::from_str(h).ok()) {
        response.headers_mut().insert(CONTENT_SHA256, value);
    }
}
