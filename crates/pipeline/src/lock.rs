//! Per-resource serialization of export operations.

use std::collections::HashMap;
use std::sync::Arc;

use mde_core::types::DbId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per resource id.
///
/// Exports of different resources run concurrently; exports of the same
/// resource queue behind each other so their artifact writes never
/// interleave.
#[derive(Debug, Default)]
pub struct ExportLocks {
    slots: Mutex<HashMap<DbId, Arc<Mutex<()>>>>,
}

impl ExportLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `resource_id`.
    ///
    /// The lock is released when the returned guard is dropped.
    pub async fn acquire(&self, resource_id: DbId) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().await;
            // Drop slots nobody holds or waits on.
            slots.retain(|id, slot| *id == resource_id || Arc::strong_count(slot) > 1);
            slots.entry(resource_id).or_default().clone()
        };
        slot.lock_owned().await
    }
}
