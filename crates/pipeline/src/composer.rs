//! EnvelopeComposer: all three schemas of one resource in a single
//! `<envelope>` document.

use mde_core::envelope::wrap_in_envelope;
use mde_core::format::{ExportScheme, MetadataFormat};
use mde_core::types::DbId;

use crate::error::ExportError;
use crate::transformer::{SchemaTransformer, XmlAttachment};

#[derive(Clone)]
pub struct EnvelopeComposer {
    transformer: SchemaTransformer,
}

impl EnvelopeComposer {
    pub fn new(transformer: SchemaTransformer) -> Self {
        Self { transformer }
    }

    /// Transform `resource_id` to every format, in envelope order, and wrap
    /// the results.
    ///
    /// Transforms run one after another. The first failure aborts the whole
    /// composition; no partial envelope is ever returned. Artifacts written
    /// by transforms that already succeeded stay on disk.
    pub async fn compose_all(&self, resource_id: DbId) -> Result<String, ExportError> {
        let _guard = self
            .transformer
            .assembler()
            .locks()
            .acquire(resource_id)
            .await;

        let mut parts = Vec::with_capacity(MetadataFormat::ALL.len());
        for format in MetadataFormat::ALL {
            parts.push(self.transformer.run(resource_id, format).await?.xml);
        }

        tracing::debug!(resource_id, "Envelope composed");
        Ok(wrap_in_envelope(parts.iter().map(String::as_str)))
    }

    /// [`compose_all`](Self::compose_all), packaged as a download.
    pub async fn compose_for_download(
        &self,
        resource_id: DbId,
    ) -> Result<XmlAttachment, ExportError> {
        let envelope = self.compose_all(resource_id).await?;
        Ok(XmlAttachment::new(resource_id, ExportScheme::All, envelope))
    }
}
