//! Batch regeneration of every canonical document.
//!
//! Unlike single-resource exports, which abort on the first error, a batch
//! run logs a failing resource and moves on to the next one.

use mde_core::types::DbId;
use mde_db::store::ResourceStore;
use serde::Serialize;

use crate::assembler::ResourceAssembler;
use crate::error::ExportError;

/// One resource that could not be regenerated.
#[derive(Debug, Clone, Serialize)]
pub struct RegenerationFailure {
    pub resource_id: DbId,
    pub error: String,
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegenerationReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<RegenerationFailure>,
}

/// Assemble every resource, in ascending id order, one at a time.
///
/// Only a failure to list the resources aborts the run.
pub async fn regenerate_all(
    store: &dyn ResourceStore,
    assembler: &ResourceAssembler,
) -> Result<RegenerationReport, ExportError> {
    let ids = store.list_resource_ids().await?;
    let mut report = RegenerationReport {
        total: ids.len(),
        ..Default::default()
    };

    for resource_id in ids {
        match assembler.assemble(resource_id).await {
            Ok(_) => report.succeeded += 1,
            Err(e) => {
                tracing::warn!(resource_id, error = %e, "Failed to regenerate canonical document");
                report.failed += 1;
                report.failures.push(RegenerationFailure {
                    resource_id,
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        total = report.total,
        succeeded = report.succeeded,
        failed = report.failed,
        "Batch regeneration finished"
    );
    Ok(report)
}
