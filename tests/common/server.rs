//! Test server management.
//!
//! Runs relayd in-process on an ephemeral localhost port with a fixed
//! hostname resolver.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relayd::config::{Config, ListenSpec, ServerConfig};
use relayd::handlers::CommandTable;
use relayd::network::{HostResolver, ResolveError};
use relayd::state::{ServerHandle, ServerInfo};
use relayd::{Running, launch};
use uuid::Uuid;

/// Server name used in every test.
pub const SERVER_NAME: &str = "irc.test";

/// Hostname the fake resolver hands out.
pub const CLIENT_HOST: &str = "client.test";

struct StaticResolver;

#[async_trait]
impl HostResolver for StaticResolver {
    async fn lookup(&self, _ip: IpAddr) -> Result<String, ResolveError> {
        Ok(CLIENT_HOST.to_string())
    }
}

/// A test server instance.
pub struct TestServer {
    running: Running,
}

impl TestServer {
    /// Spawn a server with default settings.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(Config::default()).await
    }

    /// Spawn a server from a TOML snippet.
    #[allow(dead_code)]
    pub async fn spawn_toml(toml: &str) -> anyhow::Result<Self> {
        Self::spawn_with(toml::from_str(toml)?).await
    }

    async fn spawn_with(mut config: Config) -> anyhow::Result<Self> {
        config.server = ServerConfig {
            name: Some(SERVER_NAME.to_string()),
            ..config.server
        };
        config.shutdown.timeout_secs = 2;

        let info = ServerInfo::new(Uuid::new_v4(), &config.server);
        let listeners = [ListenSpec::plain(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)];
        let running = launch(
            info,
            &listeners,
            &config,
            CommandTable::new(),
            Arc::new(StaticResolver),
        )
        .await?;

        Ok(Self { running })
    }

    /// Address the server is accepting on.
    pub fn addr(&self) -> SocketAddr {
        self.running.local_addrs[0]
    }

    #[allow(dead_code)]
    pub fn handle(&self) -> &ServerHandle {
        &self.running.server
    }

    /// Shut down and wait for the server actor to finish.
    #[allow(dead_code)]
    pub async fn shutdown(self, reason: Option<&str>) -> anyhow::Result<()> {
        self.running
            .server
            .shutdown(reason.map(str::to_string))
            .await?;
        tokio::time::timeout(Duration::from_secs(5), self.running.actor).await??;
        Ok(())
    }
}
