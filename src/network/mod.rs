//! Network module.
//!
//! Contains the Gateway (TCP/TLS listeners), the per-connection Client
//! Actor and hostname resolution.

mod connection;
mod gateway;
pub mod resolver;

pub use connection::{ConnectionContext, spawn_client};
pub use gateway::Gateway;
pub use resolver::{DnsResolver, HostResolver, ResolveError};
