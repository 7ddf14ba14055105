//! CLI subcommands

pub mod seed;
pub mod serve;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vlab_store::TursoLabStore;

/// Database connection flags shared by subcommands
#[derive(Debug, Args)]
pub struct DatabaseArgs {
    /// Path to the local database file (defaults to the platform data dir)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Remote Turso database URL (requires --turso-token)
    #[arg(long, requires = "turso_token")]
    pub turso_url: Option<String>,

    /// Auth token for the remote Turso database
    #[arg(long, requires = "turso_url")]
    pub turso_token: Option<String>,
}

impl DatabaseArgs {
    /// Open the store described by these flags
    pub async fn open(&self) -> Result<TursoLabStore> {
        if let (Some(url), Some(token)) = (&self.turso_url, &self.turso_token) {
            return TursoLabStore::new_remote(url, token)
                .await
                .context("connecting to remote Turso database");
        }

        let path = match &self.db {
            Some(path) => path.clone(),
            None => default_db_path()?,
        };
        TursoLabStore::new_local(&path)
            .await
            .with_context(|| format!("opening local database at {}", path.display()))
    }
}

/// Default database location under the platform data directory
fn default_db_path() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .context("could not determine data directory")?
        .join("vlab");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating data directory {}", dir.display()))?;
    Ok(dir.join("vlab.db"))
}
