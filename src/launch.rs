//! Wiring the actors and listeners together.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::config::{Config, ListenSpec};
use crate::handlers::CommandTable;
use crate::network::{ConnectionContext, Gateway, HostResolver};
use crate::state::{ServerActor, ServerHandle, ServerInfo};

/// A started server.
pub struct Running {
    /// Handle to the Server Actor; `shutdown` stops everything.
    pub server: ServerHandle,
    /// The Server Actor task. Finishes once shutdown completes.
    pub actor: JoinHandle<()>,
    /// Addresses actually bound.
    pub local_addrs: Vec<SocketAddr>,
}

/// Bind `listeners` and start the Server Actor.
///
/// Fails only when no listener could be bound.
pub async fn launch(
    info: ServerInfo,
    listeners: &[ListenSpec],
    config: &Config,
    commands: CommandTable,
    resolver: Arc<dyn HostResolver>,
) -> anyhow::Result<Running> {
    let gateway = Gateway::bind(listeners).await;
    if gateway.is_empty() {
        anyhow::bail!("no listener could be bound ({} configured)", listeners.len());
    }
    let local_addrs = gateway.local_addrs();

    let (actor, server) = ServerActor::new(config.shutdown.timeout());
    let ctx = ConnectionContext {
        server: server.clone(),
        info: Arc::new(info),
        commands: Arc::new(commands),
        resolver,
        limits: config.limits.line_limits(),
    };
    let accept_tasks = gateway.start(ctx);
    let actor = actor.with_listeners(accept_tasks).spawn();

    info!(listeners = local_addrs.len(), "Server started");
    Ok(Running {
        server,
        actor,
        local_addrs,
    })
}
