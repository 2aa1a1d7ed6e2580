//! XSLT processor port and the `xsltproc` subprocess implementation.
//!
//! The pipeline only needs "apply this stylesheet file to this document
//! file and give me the output". [`XsltProcessor`] captures exactly that so
//! tests and alternative engines can be swapped in.

use std::path::Path;

use async_trait::async_trait;

/// Default executable used by [`XsltProc`].
pub const DEFAULT_XSLTPROC_BIN: &str = "xsltproc";

/// Error type for XSLT transformations.
#[derive(Debug, thiserror::Error)]
pub enum XsltError {
    #[error("XSLT processor could not be started: {0}")]
    ProcessorUnavailable(std::io::Error),

    #[error("XSLT processing failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("XSLT processing produced no output")]
    EmptyOutput,
}

/// Applies a stylesheet file to a document file.
#[async_trait]
pub trait XsltProcessor: Send + Sync {
    /// Transform `document` with `stylesheet`, returning the serialized result.
    async fn transform(&self, stylesheet: &Path, document: &Path) -> Result<String, XsltError>;
}

/// Runs the libxslt command line tool.
#[derive(Debug, Clone)]
pub struct XsltProc {
    program: String,
}

impl XsltProc {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for XsltProc {
    fn default() -> Self {
        Self::new(DEFAULT_XSLTPROC_BIN)
    }
}

#[async_trait]
impl XsltProcessor for XsltProc {
    async fn transform(&self, stylesheet: &Path, document: &Path) -> Result<String, XsltError> {
        let output = tokio::process::Command::new(&self.program)
            .arg("--nonet")
            .arg(stylesheet)
            .arg(document)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(XsltError::ProcessorUnavailable)?;

        if !output.status.success() {
            return Err(XsltError::ExecutionFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let result = String::from_utf8_lossy(&output.stdout).into_owned();
        if result.trim().is_empty() {
            return Err(XsltError::EmptyOutput);
        }
        Ok(result)
    }
}
