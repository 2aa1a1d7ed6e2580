use std::path::PathBuf;

use mde_core::xslt::DEFAULT_XSLTPROC_BIN;

/// Filesystem locations and tools used by the export pipeline.
///
/// Shared by the API server and the batch worker.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Directory receiving canonical and transformed artifacts.
    pub output_dir: PathBuf,
    /// Directory holding the three mapping stylesheets.
    pub xslt_dir: PathBuf,
    /// Directory holding the vocabulary cache JSON files.
    pub thesauri_dir: PathBuf,
    /// XSLT engine executable.
    pub xsltproc_bin: String,
}

impl ExportSettings {
    /// Load settings from environment variables with sensible defaults.
    ///
    /// | Env var          | Default         |
    /// |------------------|-----------------|
    /// | `XML_OUTPUT_DIR` | `xml`           |
    /// | `XSLT_DIR`       | `schemas/XSLT`  |
    /// | `THESAURI_DIR`   | `json/thesauri` |
    /// | `XSLTPROC_BIN`   | `xsltproc`      |
    pub fn from_env() -> Self {
        let output_dir = std::env::var("XML_OUTPUT_DIR").unwrap_or_else(|_| "xml".into());
        let xslt_dir = std::env::var("XSLT_DIR").unwrap_or_else(|_| "schemas/XSLT".into());
        let thesauri_dir =
            std::env::var("THESAURI_DIR").unwrap_or_else(|_| "json/thesauri".into());
        let xsltproc_bin =
            std::env::var("XSLTPROC_BIN").unwrap_or_else(|_| DEFAULT_XSLTPROC_BIN.into());

        Self {
            output_dir: output_dir.into(),
            xslt_dir: xslt_dir.into(),
            thesauri_dir: thesauri_dir.into(),
            xsltproc_bin,
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: "xml".into(),
            xslt_dir: "schemas/XSLT".into(),
            thesauri_dir: "json/thesauri".into(),
            xsltproc_bin: DEFAULT_XSLTPROC_BIN.into(),
        }
    }
}
