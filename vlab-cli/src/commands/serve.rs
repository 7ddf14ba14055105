//! Serve command for running the Virtual Lab server
//!
//! Opens the configured store, optionally seeds the default catalog, and
//! serves the JSON API until interrupted.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::info;
use vlab_core::{IdentityProvider, LearnerIdentity, StaticTokenProvider};
use vlab_server::{AppState, ServerConfig, VlabServer};
use vlab_store::{LabStore, seed_default_catalog};

use super::DatabaseArgs;

/// Default port for the vlab server
pub const DEFAULT_PORT: u16 = 7480;
/// Default host for the vlab server
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Seed the default catalog before serving
    #[arg(long)]
    pub seed: bool,

    /// Development access token as TOKEN:USER_ID (repeatable).
    /// Stands in for the hosted identity provider.
    #[arg(long = "access-token", value_name = "TOKEN:USER_ID")]
    pub access_tokens: Vec<String>,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let store = args.database.open().await?;

    if args.seed {
        if seed_default_catalog(&store).await? {
            info!("seeded default catalog");
        }
    }

    let identity = build_provider(&args.access_tokens)?;
    let state = Arc::new(AppState::new(
        Arc::new(store) as Arc<dyn LabStore>,
        identity,
    ));

    let config = ServerConfig::new(args.host, args.port);
    info!("starting vlab server on {}", config.addr());
    VlabServer::new(config, state).run().await?;
    Ok(())
}

/// Build the static token table from TOKEN:USER_ID pairs
fn build_provider(pairs: &[String]) -> Result<Arc<dyn IdentityProvider>> {
    let mut provider = StaticTokenProvider::new();
    for pair in pairs {
        let (token, user_id) = pair
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("expected TOKEN:USER_ID, got {:?}", pair))?;
        provider = provider.with_token(token, LearnerIdentity::new(user_id));
    }
    Ok(Arc::new(provider))
}
