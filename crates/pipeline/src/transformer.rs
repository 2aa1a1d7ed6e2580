//! SchemaTransformer: canonical document -> DataCite / ISO 19115 / DIF.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mde_core::artifact::ArtifactRecord;
use mde_core::format::{ExportScheme, MetadataFormat};
use mde_core::types::DbId;
use mde_core::xslt::XsltProcessor;

use crate::assembler::ResourceAssembler;
use crate::error::{ArtifactKind, ExportError};

/// A transformed document and where it was written.
#[derive(Debug, Clone)]
pub struct TransformedDocument {
    pub format: MetadataFormat,
    pub xml: String,
    pub record: ArtifactRecord,
}

/// A fully computed XML body ready to be served as a file download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttachment {
    /// `dataset_{id}_{scheme|all}.xml`
    pub filename: String,
    pub body: String,
    /// Content hash of the persisted artifact, when the body is one.
    pub sha256: Option<String>,
}

impl XmlAttachment {
    pub fn new(resource_id: DbId, scheme: ExportScheme, body: String) -> Self {
        Self {
            filename: format!("dataset_{resource_id}_{}.xml", scheme.label()),
            body,
            sha256: None,
        }
    }
}

/// Applies the mapping stylesheets to freshly assembled canonical documents.
#[derive(Clone)]
pub struct SchemaTransformer {
    assembler: ResourceAssembler,
    xslt: Arc<dyn XsltProcessor>,
    xslt_dir: PathBuf,
}

impl SchemaTransformer {
    pub fn new(
        assembler: ResourceAssembler,
        xslt: Arc<dyn XsltProcessor>,
        xslt_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            assembler,
            xslt,
            xslt_dir: xslt_dir.into(),
        }
    }

    pub fn assembler(&self) -> &ResourceAssembler {
        &self.assembler
    }

    /// Location of the stylesheet for `format`.
    pub fn stylesheet_path(&self, format: MetadataFormat) -> PathBuf {
        self.xslt_dir.join(format.stylesheet())
    }

    /// Re-assemble `resource_id`, transform it to `format` and persist the
    /// result.
    pub async fn transform(
        &self,
        resource_id: DbId,
        format: MetadataFormat,
    ) -> Result<TransformedDocument, ExportError> {
        let _guard = self.assembler.locks().acquire(resource_id).await;
        self.run(resource_id, format).await
    }

    /// [`transform`](Self::transform), returning only the XML for
    /// programmatic reuse.
    pub async fn transform_to_string(
        &self,
        resource_id: DbId,
        format: MetadataFormat,
    ) -> Result<String, ExportError> {
        Ok(self.transform(resource_id, format).await?.xml)
    }

    /// [`transform`](Self::transform), packaged as a download.
    pub async fn transform_for_download(
        &self,
        resource_id: DbId,
        format: MetadataFormat,
    ) -> Result<XmlAttachment, ExportError> {
        let doc = self.transform(resource_id, format).await?;
        Ok(XmlAttachment {
            sha256: Some(doc.record.sha256),
            ..XmlAttachment::new(resource_id, ExportScheme::Single(format), doc.xml)
        })
    }

    /// Transform without taking the resource lock. The caller must already
    /// hold it.
    pub(crate) async fn run(
        &self,
        resource_id: DbId,
        format: MetadataFormat,
    ) -> Result<TransformedDocument, ExportError> {
        let canonical = self.assembler.build(resource_id).await?;

        let document = canonical.record.path;
        let stylesheet = self.stylesheet_path(format);
        require_file(ArtifactKind::CanonicalXml, &document).await?;
        require_file(ArtifactKind::Stylesheet, &stylesheet).await?;

        tracing::debug!(
            resource_id,
            format = %format,
            stylesheet = %stylesheet.display(),
            "Applying stylesheet"
        );
        let xml = self
            .xslt
            .transform(&stylesheet, &document)
            .await
            .map_err(|source| ExportError::TransformFailure { format, source })?;

        let artifacts = self.assembler.artifacts();
        let path = artifacts.format_path(format, resource_id);
        let record = artifacts.write(&path, &xml).await?;
        tracing::info!(
            resource_id,
            format = %format,
            path = %record.path.display(),
            bytes = record.bytes,
            sha256 = %record.sha256,
            "Transformed document written"
        );

        Ok(TransformedDocument {
            format,
            xml,
            record,
        })
    }
}

async fn require_file(kind: ArtifactKind, path: &Path) -> Result<(), ExportError> {
    match tokio::fs::try_exists(path).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(ExportError::MissingArtifact {
            kind,
            path: path.display().to_string(),
        }),
        Err(source) => Err(ExportError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}
