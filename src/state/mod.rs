//! Actor state.
//!
//! - [`server`]: the server actor, sole owner of the nick registry
//! - [`client`]: client events, handles and per-connection state

pub mod client;
pub mod server;

pub use client::{Client, ClientEvent, ClientHandle, PLACEHOLDER, RegistrationState};
pub use server::{ServerActor, ServerEvent, ServerHandle};

use uuid::Uuid;

use crate::config::ServerConfig;

/// Server identity shared read-only by every connection.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    /// Persistent id from the store.
    pub id: Uuid,
    /// Origin of server lines: the configured name, else the id.
    pub name: String,
    pub network: String,
    /// Connection password required from clients, if any.
    pub password: Option<String>,
}

impl ServerInfo {
    pub fn new(id: Uuid, config: &ServerConfig) -> Self {
        Self {
            id,
            name: config.name.clone().unwrap_or_else(|| id.to_string()),
            network: config.network.clone(),
            password: config.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friendly_name_falls_back_to_id() {
        let id = Uuid::new_v4();
        let info = ServerInfo::new(id, &ServerConfig::default());
        assert_eq!(info.name, id.to_string());

        let config = ServerConfig {
            name: Some("irc.local".into()),
            ..ServerConfig::default()
        };
        assert_eq!(ServerInfo::new(id, &config).name, "irc.local");
    }
}
