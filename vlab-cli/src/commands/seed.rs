//! Seed command for populating the default catalog

use anyhow::Result;
use clap::Args;
use tracing::info;
use vlab_store::seed_default_catalog;

use super::DatabaseArgs;

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the seed command
pub async fn run(args: SeedArgs) -> Result<()> {
    let store = args.database.open().await?;
    if seed_default_catalog(&store).await? {
        info!("default catalog seeded");
    } else {
        info!("catalog already seeded, nothing to do");
    }
    Ok(())
}
