//! Integration tests for the export endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, body_text, build_test_app, build_test_app_with, get, header, post, store_with,
};
use mde_core::format::{MetadataFormat, INVALID_SCHEME_MESSAGE};
use mde_core::hashing::sha256_hex;

// ---------------------------------------------------------------------------
// Single schema
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_scheme_inline_returns_xml_and_hash() {
    let test = build_test_app(store_with(&[1]));
    let response = get(test.app(), "/api/v1/resources/1/export/datacite").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "content-type"), "application/xml; charset=utf-8");
    let sha = header(&response, "x-content-sha256").to_string();

    let body = body_text(response).await;
    assert!(body.contains("<resource/>"));
    assert_eq!(sha, sha256_hex(body.as_bytes()));

    let persisted = std::fs::read_to_string(test.output_file("datacite_resource_1.xml")).unwrap();
    assert_eq!(persisted, body);
    assert!(test.output_file("resource_1.xml").exists());
}

#[tokio::test]
async fn single_scheme_download_sets_attachment_headers() {
    let test = build_test_app(store_with(&[4]));
    let response = get(test.app(), "/api/v1/resources/4/export/dif?download=true").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "content-type"), "application/octet-stream");
    assert_eq!(
        header(&response, "content-disposition"),
        "attachment; filename=\"dataset_4_dif.xml\""
    );
    assert_eq!(header(&response, "content-transfer-encoding"), "binary");
    let length: usize = header(&response, "content-length").parse().unwrap();

    let body = body_text(response).await;
    assert_eq!(length, body.len());
    assert!(body.contains("<DIF/>"));
}

#[tokio::test]
async fn download_false_is_served_inline() {
    let test = build_test_app(store_with(&[1]));
    let response = get(test.app(), "/api/v1/resources/1/export/iso?download=false").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("content-disposition").is_none());
}

#[tokio::test]
async fn scheme_is_matched_case_insensitively() {
    let test = build_test_app(store_with(&[1]));
    let response = get(test.app(), "/api/v1/resources/1/export/DataCite").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(test.output_file("datacite_resource_1.xml").exists());
}

#[tokio::test]
async fn unknown_scheme_returns_400_without_touching_artifacts() {
    let test = build_test_app(store_with(&[1]));
    let response = get(test.app(), "/api/v1/resources/1/export/xyz").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": INVALID_SCHEME_MESSAGE })
    );
    assert!(!test.output_file("resource_1.xml").exists());
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn all_scheme_inline_returns_envelope() {
    let test = build_test_app(store_with(&[2]));
    let response = get(test.app(), "/api/v1/resources/2/export/all").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-content-sha256").is_none());

    let body = body_text(response).await;
    assert_eq!(body.matches("<?xml").count(), 1);
    let datacite = body.find("<resource/>").unwrap();
    let iso = body.find("<MD_Metadata/>").unwrap();
    let dif = body.find("<DIF/>").unwrap();
    assert!(datacite < iso && iso < dif);
    assert!(body.trim_end().ends_with("</envelope>"));
}

#[tokio::test]
async fn all_scheme_download_is_named_all() {
    let test = build_test_app(store_with(&[2]));
    let response = get(test.app(), "/api/v1/resources/2/export/ALL?download=true").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header(&response, "content-disposition"),
        "attachment; filename=\"dataset_2_all.xml\""
    );
    assert!(body_text(response).await.contains("<envelope>"));
}

#[tokio::test]
async fn envelope_route_matches_all_scheme() {
    let test = build_test_app(store_with(&[3]));

    let envelope = body_text(get(test.app(), "/api/v1/resources/3/envelope").await).await;
    let all = body_text(get(test.app(), "/api/v1/resources/3/export/all").await).await;

    assert_eq!(envelope, all);
}

#[tokio::test]
async fn envelope_fails_when_one_format_fails() {
    let test = build_test_app_with(store_with(&[1]), Some(MetadataFormat::Iso));
    let response = get(test.app(), "/api/v1/resources/1/export/all").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("XSLT transformation to iso failed"));

    assert!(test.output_file("datacite_resource_1.xml").exists());
    assert!(!test.output_file("dif_resource_1.xml").exists());
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_resource_returns_404_and_writes_nothing() {
    let test = build_test_app(store_with(&[1]));
    let response = get(test.app(), "/api/v1/resources/99/export/datacite").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "Resource with id 99 not found" })
    );
    assert!(!test.output_file("resource_99.xml").exists());
    assert!(!test.output_file("datacite_resource_99.xml").exists());
}

#[tokio::test]
async fn missing_stylesheet_returns_500_with_path() {
    let test = build_test_app(store_with(&[1]));
    let stylesheet = test.stylesheet(MetadataFormat::Iso);
    std::fs::remove_file(&stylesheet).unwrap();

    let response = get(test.app(), "/api/v1/resources/1/export/iso").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        format!("XSLT stylesheet file not found: {}", stylesheet.display())
    );
}

#[tokio::test]
async fn non_numeric_id_is_rejected_with_json_error() {
    let test = build_test_app(store_with(&[1]));
    let response = get(test.app(), "/api/v1/resources/abc/export/datacite").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(header(&response, "content-type").starts_with("application/json"));
    let json = body_json(response).await;
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn malformed_download_flag_is_rejected_with_json_error() {
    let test = build_test_app(store_with(&[1]));
    let response = get(test.app(), "/api/v1/resources/1/export/iso?download=yes").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("download"));
    assert!(!test.output_file("resource_1.xml").exists());
}

#[tokio::test]
async fn non_numeric_id_on_canonical_route_is_json() {
    let test = build_test_app(store_with(&[1]));
    let response = get(test.app(), "/api/v1/resources/first/canonical").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

// ---------------------------------------------------------------------------
// Canonical document and batch regeneration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn canonical_route_returns_persisted_document() {
    let test = build_test_app(store_with(&[5]));
    let response = get(test.app(), "/api/v1/resources/5/canonical").await;

    assert_eq!(response.status(), StatusCode::OK);
    let sha = header(&response, "x-content-sha256").to_string();
    let body = body_text(response).await;

    assert!(body.contains("<Resource>"));
    assert!(body.contains("Magnetotelluric survey 5"));
    assert_eq!(sha, sha256_hex(body.as_bytes()));
    assert_eq!(std::fs::read_to_string(test.output_file("resource_5.xml")).unwrap(), body);
}

#[tokio::test]
async fn regenerate_reports_every_resource() {
    let test = build_test_app(store_with(&[1, 2, 3]));
    let response = post(test.app(), "/api/v1/resources/regenerate").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 3);
    assert_eq!(json["data"]["succeeded"], 3);
    assert_eq!(json["data"]["failed"], 0);
    assert_eq!(json["data"]["failures"], serde_json::json!([]));

    for id in 1..=3 {
        assert!(test.output_file(&format!("resource_{id}.xml")).exists());
    }
}
