#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{NaiveDate, TimeZone, Utc};
use http_body_util::BodyExt;
use mde_api::config::ServerConfig;
use mde_api::router::build_app_router;
use mde_api::state::AppState;
use mde_core::format::MetadataFormat;
use mde_core::types::DbId;
use mde_core::xslt::{XsltError, XsltProcessor};
use mde_db::memory::{MemoryStore, ResourceFixture};
use mde_db::models::party::Author;
use mde_db::models::resource::{ResourceDetail, Title};
use mde_db::store::ResourceStore;
use mde_pipeline::{ExportPipeline, ExportSettings};
use tempfile::TempDir;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

// ---------------------------------------------------------------------------
// Stub XSLT engine
// ---------------------------------------------------------------------------

/// Emits `<{root}/>` for each stylesheet, failing for one format if asked.
pub struct StubXslt {
    fail_on: Option<MetadataFormat>,
}

#[async_trait]
impl XsltProcessor for StubXslt {
    async fn transform(&self, stylesheet: &Path, _document: &Path) -> Result<String, XsltError> {
        let name = stylesheet.file_name().unwrap().to_string_lossy();
        let format = MetadataFormat::ALL
            .into_iter()
            .find(|f| f.stylesheet() == name)
            .unwrap();
        if self.fail_on == Some(format) {
            return Err(XsltError::ExecutionFailed {
                exit_code: Some(6),
                stderr: "xsl:template did not match".to_string(),
            });
        }
        let root = match format {
            MetadataFormat::DataCite => "resource",
            MetadataFormat::Iso => "MD_Metadata",
            MetadataFormat::Dif => "DIF",
        };
        Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<{root}/>\n"))
    }
}

// ---------------------------------------------------------------------------
// Test application
// ---------------------------------------------------------------------------

/// A router over a temp directory; the directory lives as long as this.
pub struct TestApp {
    pub dir: TempDir,
    pub settings: ExportSettings,
    pub router: Router,
}

impl TestApp {
    /// A fresh clone of the router for one `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn output_file(&self, name: &str) -> PathBuf {
        self.settings.output_dir.join(name)
    }

    pub fn stylesheet(&self, format: MetadataFormat) -> PathBuf {
        self.settings.xslt_dir.join(format.stylesheet())
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over `store`, with all stylesheets present.
pub fn build_test_app(store: MemoryStore) -> TestApp {
    build_test_app_with(store, None)
}

/// As [`build_test_app`], with the XSLT stub failing for `fail_on`.
pub fn build_test_app_with(store: MemoryStore, fail_on: Option<MetadataFormat>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let settings = ExportSettings {
        output_dir: dir.path().join("xml"),
        xslt_dir: dir.path().join("schemas/XSLT"),
        thesauri_dir: dir.path().join("json/thesauri"),
        xsltproc_bin: "unused".to_string(),
    };
    std::fs::create_dir_all(&settings.xslt_dir).unwrap();
    for format in MetadataFormat::ALL {
        std::fs::write(settings.xslt_dir.join(format.stylesheet()), "<xsl:stylesheet/>").unwrap();
    }

    let config = test_config();
    let store: Arc<dyn ResourceStore> = Arc::new(store);
    let xslt = Arc::new(StubXslt { fail_on });
    let pipeline = ExportPipeline::new(Arc::clone(&store), xslt, &settings);
    let state = AppState {
        store,
        pipeline: Arc::new(pipeline),
        config: Arc::new(config.clone()),
    };

    TestApp {
        dir,
        settings,
        router: build_app_router(state, &config),
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn resource(id: DbId) -> ResourceFixture {
    let mut fixture = ResourceFixture::new(ResourceDetail {
        id,
        doi: Some(format!("10.5880/GFZ.{id}")),
        version: None,
        year: 2025,
        date_created: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        date_embargo_until: None,
        rights_text: "Creative Commons Attribution 4.0 International".to_string(),
        rights_identifier: Some("CC-BY-4.0".to_string()),
        rights_uri: None,
        resource_type_general: "Dataset".to_string(),
        resource_type_description: None,
        language_code: "en".to_string(),
        language_name: "English".to_string(),
        updated_at: Utc.with_ymd_and_hms(2025, 6, 30, 8, 0, 0).unwrap(),
    });
    fixture.titles.push(Title {
        id: id * 10,
        text: format!("Magnetotelluric survey {id}"),
        title_type: "Main".to_string(),
    });
    fixture.authors.push(Author {
        id: id * 10,
        position: 0,
        family_name: Some("Ritter".to_string()),
        given_name: Some("Oliver".to_string()),
        orcid: None,
        institution_name: None,
    });
    fixture
}

pub fn store_with(ids: &[DbId]) -> MemoryStore {
    let mut store = MemoryStore::new();
    for &id in ids {
        store.insert(resource(id));
    }
    store
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri).await
}

async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn header<'a>(response: &'a Response<Body>, name: &str) -> &'a str {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing {name} header"))
        .to_str()
        .unwrap()
}
