//! Reverse hostname lookup.
//!
//! A PTR name is only trusted when a forward lookup of that name returns the
//! original address.

use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("lookup failed: {0}")]
    Lookup(String),
    #[error("no hostname confirms {0}")]
    Unconfirmed(IpAddr),
}

/// Maps a peer address to a hostname.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn lookup(&self, ip: IpAddr) -> Result<String, ResolveError>;
}

/// DNS-backed resolver.
#[derive(Clone)]
pub struct DnsResolver {
    resolver: TokioResolver,
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsResolver {
    /// Use the system resolver configuration, or public defaults if it
    /// cannot be read.
    pub fn new() -> Self {
        let resolver = TokioResolver::builder_tokio()
            .map(|b| b.build())
            .unwrap_or_else(|_| {
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                )
                .build()
            });
        Self { resolver }
    }

    async fn confirms(&self, host: &str, ip: IpAddr) -> bool {
        match self.resolver.lookup_ip(host).await {
            Ok(addrs) => addrs.iter().any(|addr| addr == ip),
            Err(e) => {
                debug!(host, error = %e, "Forward lookup failed");
                false
            }
        }
    }
}

#[async_trait]
impl HostResolver for DnsResolver {
    async fn lookup(&self, ip: IpAddr) -> Result<String, ResolveError> {
        let names = self
            .resolver
            .reverse_lookup(ip)
            .await
            .map_err(|e| ResolveError::Lookup(e.to_string()))?;

        for ptr in names.iter() {
            let name = ptr.0.to_utf8();
            if self.confirms(&name, ip).await {
                let host = name.trim_end_matches('.');
                return Ok(host.to_string());
            }
        }

        Err(ResolveError::Unconfirmed(ip))
    }
}
