//! Gateway - TCP/TLS listeners that accept incoming connections.
//!
//! Every configured listener is bound concurrently. A listener that fails to
//! bind is logged and skipped; the caller decides whether an empty gateway
//! is fatal. Each bound listener gets its own accept task, and each accepted
//! socket becomes a Client Actor via [`spawn_client`].

use std::io::{BufReader, Cursor};
use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::future::join_all;
use rustls_pemfile::{certs, pkcs8_private_keys};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_rustls::TlsAcceptor;
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tracing::{Instrument, error, info, warn};

use super::connection::{ConnectionContext, spawn_client};
use crate::config::{ListenSpec, TlsSpec};
use crate::telemetry::spans;

struct Listener {
    socket: TcpListener,
    addr: SocketAddr,
    tls: Option<TlsAcceptor>,
}

/// The set of bound listeners, not yet accepting.
pub struct Gateway {
    listeners: Vec<Listener>,
}

impl Gateway {
    /// Bind every listener in parallel, logging and skipping failures.
    pub async fn bind(specs: &[ListenSpec]) -> Self {
        let results = join_all(specs.iter().map(Self::bind_one)).await;

        let listeners = specs
            .iter()
            .zip(results)
            .filter_map(|(spec, result)| match result {
                Ok(listener) => Some(listener),
                Err(e) => {
                    error!(addr = %spec.socket_addr(), error = %e, "Failed to bind listener");
                    None
                }
            })
            .collect();

        Self { listeners }
    }

    async fn bind_one(spec: &ListenSpec) -> anyhow::Result<Listener> {
        let tls = spec.tls.as_ref().map(Self::load_tls).transpose()?;
        let socket = TcpListener::bind(spec.socket_addr()).await?;
        let addr = socket.local_addr()?;
        info!(%addr, tls = tls.is_some(), "Listener bound");
        Ok(Listener { socket, addr, tls })
    }

    /// Load TLS certificates and create TlsAcceptor.
    fn load_tls(config: &TlsSpec) -> anyhow::Result<TlsAcceptor> {
        let cert_file = std::fs::read(&config.cert_path)?;
        let cert_reader = &mut BufReader::new(Cursor::new(cert_file));
        let certs: Vec<CertificateDer> = certs(cert_reader).collect::<Result<Vec<_>, _>>()?;

        if certs.is_empty() {
            anyhow::bail!("No certificates found in {}", config.cert_path.display());
        }

        let key_file = std::fs::read(&config.key_path)?;
        let key_reader = &mut BufReader::new(Cursor::new(key_file));
        let mut keys: Vec<PrivateKeyDer> = pkcs8_private_keys(key_reader)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(PrivateKeyDer::from)
            .collect();

        if keys.is_empty() {
            anyhow::bail!("No private keys found in {}", config.key_path.display());
        }

        let key = keys.remove(0);

        let tls_config = ServerConfig::builder()
            .with_no_client_auth()
            .with_single_cert(certs, key)?;

        Ok(TlsAcceptor::from(Arc::new(tls_config)))
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Actual bound addresses, including ports picked by the OS.
    pub fn local_addrs(&self) -> Vec<SocketAddr> {
        self.listeners.iter().map(|l| l.addr).collect()
    }

    /// Start one accept task per listener. Aborting a returned handle closes
    /// that listener's socket.
    pub fn start(self, ctx: ConnectionContext) -> Vec<JoinHandle<()>> {
        self.listeners
            .into_iter()
            .map(|listener| {
                let span = spans::listener(&listener.addr, listener.tls.is_some());
                tokio::spawn(accept_loop(listener, ctx.clone()).instrument(span))
            })
            .collect()
    }
}

async fn accept_loop(listener: Listener, ctx: ConnectionContext) {
    loop {
        let (stream, addr) = match listener.socket.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };

        if let Err(e) = stream.set_nodelay(true) {
            warn!(%addr, error = %e, "Failed to set TCP_NODELAY");
        }

        match &listener.tls {
            None => {
                info!(%addr, "Connection accepted");
                spawn_client(stream, addr, ctx.clone());
            }
            Some(acceptor) => {
                let acceptor = acceptor.clone();
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    match acceptor.accept(stream).await {
                        Ok(tls_stream) => {
                            info!(%addr, "TLS connection accepted");
                            spawn_client(tls_stream, addr, ctx);
                        }
                        Err(e) => warn!(%addr, error = %e, "TLS handshake failed"),
                    }
                });
            }
        }
    }
}
