//! relayd - multi-client line-oriented chat relay server.

use std::path::Path;
use std::sync::Arc;

use relayd::config::Config;
use relayd::handlers::CommandTable;
use relayd::network::DnsResolver;
use relayd::state::ServerInfo;
use relayd::store::{RedbStore, load_listeners, load_or_create_id};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "config.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = load_config()?;

    let store = RedbStore::open(&config.store.path).map_err(|e| {
        error!(path = %config.store.path.display(), error = %e, "Failed to open store");
        e
    })?;
    let id = load_or_create_id(&store)?;
    let listeners = load_listeners(&store)?;
    let info = ServerInfo::new(id, &config.server);

    info!(
        server = %info.name,
        network = %info.network,
        id = %info.id,
        "Starting relayd"
    );

    let running = relayd::launch(
        info,
        &listeners,
        &config,
        CommandTable::new(),
        Arc::new(DnsResolver::new()),
    )
    .await?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!(error = %e, "Failed to listen for ctrl-c");
            }
            info!("Shutdown signal received");
            if running.server.shutdown(None).await.is_err() {
                warn!("Server actor already stopped");
            }
        }
        result = running.actor => {
            if let Err(e) = result {
                error!(error = %e, "Server actor failed");
            }
        }
    }

    info!("relayd stopped");
    Ok(())
}

/// Config from the path in the first argument. Without an argument a missing
/// `config.toml` means built-in defaults.
fn load_config() -> anyhow::Result<Config> {
    match std::env::args().nth(1) {
        Some(path) => Ok(Config::load(&path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load config");
            e
        })?),
        None if !Path::new(DEFAULT_CONFIG).exists() => {
            info!("No {DEFAULT_CONFIG} found, using defaults");
            Ok(Config::default())
        }
        None => Ok(Config::load(DEFAULT_CONFIG)?),
    }
}
