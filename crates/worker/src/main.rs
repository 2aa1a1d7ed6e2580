//! One-shot job that regenerates the canonical document of every resource.
//!
//! Prints the regeneration report as JSON on stdout and exits non-zero if
//! any resource failed.

use std::sync::Arc;

use anyhow::Context;
use mde_db::store::{PgResourceStore, ResourceStore};
use mde_pipeline::{ExportPipeline, ExportSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mde_worker=info,mde_pipeline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = mde_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    let settings = ExportSettings::from_env();
    tracing::info!(output_dir = %settings.output_dir.display(), "Regenerating canonical documents");

    let store: Arc<dyn ResourceStore> = Arc::new(PgResourceStore::new(pool));
    let pipeline = ExportPipeline::with_xsltproc(store, &settings);

    let report = pipeline
        .regenerate_all()
        .await
        .context("Failed to list resources")?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.failed > 0 {
        anyhow::bail!("{} of {} resources failed to regenerate", report.failed, report.total);
    }
    Ok(())
}
