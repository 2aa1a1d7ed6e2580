use std::sync::Arc;

use mde_db::store::ResourceStore;
use mde_pipeline::ExportPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Read port over the resource tables.
    pub store: Arc<dyn ResourceStore>,
    /// Assembler, transformer and composer sharing one set of resource locks.
    pub pipeline: Arc<ExportPipeline>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
