//! Listener descriptions.
//!
//! Listeners are read from the store under the `listeners` key rather than
//! from the TOML file, so they are serializable as well as deserializable.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// One socket the server accepts clients on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenSpec {
    /// Address to bind to.
    pub ip: IpAddr,
    /// Port to bind to.
    pub port: u16,
    /// Wrap accepted sockets in TLS when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsSpec>,
}

/// TLS settings for a listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsSpec {
    /// Path to certificate chain file (PEM format).
    pub cert_path: PathBuf,
    /// Path to private key file (PEM format).
    pub key_path: PathBuf,
}

impl ListenSpec {
    /// Plaintext listener on `ip:port`.
    pub fn plain(ip: IpAddr, port: u16) -> Self {
        Self { ip, port, tls: None }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }

    /// Used when the store holds no listener list.
    pub fn defaults() -> Vec<ListenSpec> {
        vec![Self::plain(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 6667)]
    }
}
