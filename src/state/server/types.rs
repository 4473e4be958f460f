//! Server actor events and handle.

use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::error::ServerGone;
use crate::state::ClientHandle;

/// Requests processed one at a time by the server actor.
#[derive(Debug)]
pub enum ServerEvent {
    /// A connection was accepted. Tracked until it deregisters so shutdown
    /// can close it, registered or not.
    ClientConnected { client: ClientHandle },
    /// Claim `nick`. Replies false if the folded name is taken.
    RegisterClient {
        nick: String,
        client: ClientHandle,
        reply_tx: oneshot::Sender<bool>,
    },
    /// Move `client` from `old` to `new`. Replies false if `new` is held by
    /// another client.
    RenameClient {
        old: String,
        new: String,
        client: ClientHandle,
        reply_tx: oneshot::Sender<bool>,
    },
    /// Release `nick` if `client_id` holds it and forget the connection.
    /// Always acknowledged.
    DeregisterClient {
        nick: String,
        client_id: Uuid,
        reply_tx: oneshot::Sender<()>,
    },
    /// Close listeners and every connected client, then stop.
    Shutdown {
        reason: Option<String>,
        reply_tx: oneshot::Sender<()>,
    },
}

/// Cloneable address of the server actor.
#[derive(Debug, Clone)]
pub struct ServerHandle {
    tx: mpsc::UnboundedSender<ServerEvent>,
}

impl ServerHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<ServerEvent>) -> Self {
        Self { tx }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> ServerEvent,
    ) -> Result<T, ServerGone> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx.send(make(reply_tx)).map_err(|_| ServerGone)?;
        reply_rx.await.map_err(|_| ServerGone)
    }

    /// Announce a new connection. Returns false once the actor is gone.
    pub fn client_connected(&self, client: &ClientHandle) -> bool {
        self.tx
            .send(ServerEvent::ClientConnected {
                client: client.clone(),
            })
            .is_ok()
    }

    pub async fn register_client(
        &self,
        nick: &str,
        client: &ClientHandle,
    ) -> Result<bool, ServerGone> {
        self.request(|reply_tx| ServerEvent::RegisterClient {
            nick: nick.to_string(),
            client: client.clone(),
            reply_tx,
        })
        .await
    }

    pub async fn rename_client(
        &self,
        old: &str,
        new: &str,
        client: &ClientHandle,
    ) -> Result<bool, ServerGone> {
        self.request(|reply_tx| ServerEvent::RenameClient {
            old: old.to_string(),
            new: new.to_string(),
            client: client.clone(),
            reply_tx,
        })
        .await
    }

    pub async fn deregister_client(&self, nick: &str, client_id: Uuid) -> Result<(), ServerGone> {
        self.request(|reply_tx| ServerEvent::DeregisterClient {
            nick: nick.to_string(),
            client_id,
            reply_tx,
        })
        .await
    }

    /// Returns once every client has closed or been forced closed.
    pub async fn shutdown(&self, reason: Option<String>) -> Result<(), ServerGone> {
        self.request(|reply_tx| ServerEvent::Shutdown { reason, reply_tx })
            .await
    }
}
