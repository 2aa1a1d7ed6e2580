//! The metadata export pipeline.
//!
//! Data flows strictly downward:
//! [`ResourceAssembler`] -> [`SchemaTransformer`] -> [`EnvelopeComposer`].
//! Every component returns values; HTTP concerns live in the API crate.

pub mod assembler;
pub mod batch;
pub mod composer;
pub mod config;
pub mod error;
pub mod graph;
pub mod lock;
pub mod transformer;

use std::sync::Arc;

use mde_core::artifact::ArtifactStore;
use mde_core::xslt::{XsltProc, XsltProcessor};
use mde_db::store::ResourceStore;

pub use assembler::{AssembledDocument, ResourceAssembler};
pub use batch::{regenerate_all, RegenerationFailure, RegenerationReport};
pub use composer::EnvelopeComposer;
pub use config::ExportSettings;
pub use error::{ArtifactKind, ExportError};
pub use lock::ExportLocks;
pub use transformer::{SchemaTransformer, TransformedDocument, XmlAttachment};

/// The three export components wired to one store, one XSLT engine and one
/// set of resource locks.
#[derive(Clone)]
pub struct ExportPipeline {
    pub assembler: ResourceAssembler,
    pub transformer: SchemaTransformer,
    pub composer: EnvelopeComposer,
}

impl ExportPipeline {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        xslt: Arc<dyn XsltProcessor>,
        settings: &ExportSettings,
    ) -> Self {
        let assembler = ResourceAssembler::new(
            store,
            ArtifactStore::new(&settings.output_dir),
            &settings.thesauri_dir,
            Arc::new(ExportLocks::new()),
        );
        let transformer = SchemaTransformer::new(assembler.clone(), xslt, &settings.xslt_dir);
        let composer = EnvelopeComposer::new(transformer.clone());

        Self {
            assembler,
            transformer,
            composer,
        }
    }

    /// Pipeline using the `xsltproc` executable named in `settings`.
    pub fn with_xsltproc(store: Arc<dyn ResourceStore>, settings: &ExportSettings) -> Self {
        let xslt = Arc::new(XsltProc::new(settings.xsltproc_bin.clone()));
        Self::new(store, xslt, settings)
    }

    /// Batch-regenerate every canonical document.
    pub async fn regenerate_all(&self) -> Result<RegenerationReport, ExportError> {
        regenerate_all(self.assembler.store(), &self.assembler).await
    }
}
