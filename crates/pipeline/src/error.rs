//! Error taxonomy of the export pipeline.

use std::fmt;

use mde_core::artifact::ArtifactWriteError;
use mde_core::error::CoreError;
use mde_core::format::MetadataFormat;
use mde_core::xml::XmlWriteError;
use mde_core::xslt::XsltError;

/// Which input of a transformation was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    CanonicalXml,
    Stylesheet,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CanonicalXml => f.write_str("Canonical XML"),
            Self::Stylesheet => f.write_str("XSLT stylesheet"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// `NotFound` for unknown resources, `InvalidFormat` for unknown schemes.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{kind} file not found: {path}")]
    MissingArtifact { kind: ArtifactKind, path: String },

    #[error("XSLT transformation to {format} failed: {source}")]
    TransformFailure {
        format: MetadataFormat,
        #[source]
        source: XsltError,
    },

    #[error("File operation failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Xml(#[from] XmlWriteError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ArtifactWriteError> for ExportError {
    fn from(err: ArtifactWriteError) -> Self {
        Self::Io {
            path: err.path,
            source: err.source,
        }
    }
}
