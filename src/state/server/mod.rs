//! The server actor.
//!
//! Owns the nick registry and processes [`ServerEvent`]s strictly one at a
//! time, so concurrent claims on a name resolve first-come-first-served.
//! Registry keys are rfc1459-folded nicknames. Every live connection is
//! also tracked by id, so shutdown reaches clients that never registered.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::Duration;

use futures_util::future::join_all;
use relay_proto::irc_to_lower;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::state::ClientHandle;

mod types;

pub use types::{ServerEvent, ServerHandle};

#[derive(Debug)]
struct Registration {
    nick: String,
    client: ClientHandle,
}

enum Flow {
    Continue,
    Stop,
}

/// The Server Actor.
pub struct ServerActor {
    rx: mpsc::UnboundedReceiver<ServerEvent>,
    registry: HashMap<String, Registration>,
    connections: HashMap<Uuid, ClientHandle>,
    listeners: Vec<JoinHandle<()>>,
    shutdown_timeout: Duration,
}

impl ServerActor {
    /// Create the actor and its handle. Nothing runs until [`spawn`].
    ///
    /// [`spawn`]: ServerActor::spawn
    pub fn new(shutdown_timeout: Duration) -> (Self, ServerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let actor = Self {
            rx,
            registry: HashMap::new(),
            connections: HashMap::new(),
            listeners: Vec::new(),
            shutdown_timeout,
        };
        (actor, ServerHandle::new(tx))
    }

    /// Accept loops to abort on shutdown.
    pub fn with_listeners(mut self, listeners: Vec<JoinHandle<()>>) -> Self {
        self.listeners.extend(listeners);
        self
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// The main actor loop.
    pub async fn run(mut self) {
        debug!("Server actor started");
        while let Some(event) = self.rx.recv().await {
            if let Flow::Stop = self.handle_event(event).await {
                break;
            }
        }
        info!("Server actor stopped");
    }

    async fn handle_event(&mut self, event: ServerEvent) -> Flow {
        match event {
            ServerEvent::ClientConnected { client } => {
                self.connections.insert(client.id(), client);
            }
            ServerEvent::RegisterClient {
                nick,
                client,
                reply_tx,
            } => {
                let _ = reply_tx.send(self.register(&nick, client));
            }
            ServerEvent::RenameClient {
                old,
                new,
                client,
                reply_tx,
            } => {
                let _ = reply_tx.send(self.rename(&old, &new, client));
            }
            ServerEvent::DeregisterClient {
                nick,
                client_id,
                reply_tx,
            } => {
                self.deregister(&nick, client_id);
                let _ = reply_tx.send(());
            }
            ServerEvent::Shutdown { reason, reply_tx } => {
                self.shutdown(reason).await;
                let _ = reply_tx.send(());
                return Flow::Stop;
            }
        }
        Flow::Continue
    }

    fn register(&mut self, nick: &str, client: ClientHandle) -> bool {
        match self.registry.entry(irc_to_lower(nick)) {
            Entry::Occupied(_) => {
                debug!(nick, uid = %client.id(), "Nick already registered");
                false
            }
            Entry::Vacant(slot) => {
                debug!(nick, uid = %client.id(), "Registered nick");
                slot.insert(Registration {
                    nick: nick.to_string(),
                    client,
                });
                true
            }
        }
    }

    fn rename(&mut self, old: &str, new: &str, client: ClientHandle) -> bool {
        let new_key = irc_to_lower(new);
        if let Some(existing) = self.registry.get(&new_key)
            && existing.client.id() != client.id()
        {
            debug!(old, new, holder = %existing.nick, "Rename target taken");
            return false;
        }

        let old_key = irc_to_lower(old);
        if self
            .registry
            .get(&old_key)
            .is_some_and(|r| r.client.id() == client.id())
        {
            self.registry.remove(&old_key);
        }

        debug!(old, new, uid = %client.id(), "Renamed nick");
        self.registry.insert(
            new_key,
            Registration {
                nick: new.to_string(),
                client,
            },
        );
        true
    }

    /// Removes the entry only when `client_id` owns it.
    fn deregister(&mut self, nick: &str, client_id: Uuid) -> bool {
        self.connections.remove(&client_id);
        let key = irc_to_lower(nick);
        let owned = self
            .registry
            .get(&key)
            .is_some_and(|r| r.client.id() == client_id);
        if owned {
            self.registry.remove(&key);
            debug!(nick, uid = %client_id, "Deregistered nick");
        }
        owned
    }

    async fn shutdown(&mut self, reason: Option<String>) {
        for listener in self.listeners.drain(..) {
            listener.abort();
        }

        let reason = match reason {
            Some(reason) => format!("Server shutting down: {reason}"),
            None => "Server shutting down".to_string(),
        };

        let mut live = std::mem::take(&mut self.connections);
        for registration in self.registry.values() {
            live.entry(registration.client.id())
                .or_insert_with(|| registration.client.clone());
        }
        let clients: Vec<ClientHandle> = live.into_values().collect();
        info!(clients = clients.len(), %reason, "Shutting down");

        let acks: Vec<_> = clients.iter().filter_map(|c| c.close(&reason)).collect();
        let all_acked = join_all(acks);
        tokio::pin!(all_acked);
        let deadline = tokio::time::sleep(self.shutdown_timeout);
        tokio::pin!(deadline);

        // Closing clients deregister through this same mailbox, so keep
        // serving it until every ack is in.
        loop {
            tokio::select! {
                _ = &mut all_acked => break,
                _ = &mut deadline => {
                    warn!(
                        timeout_secs = self.shutdown_timeout.as_secs(),
                        "Clients did not close in time, forcing"
                    );
                    for client in &clients {
                        client.force_close();
                    }
                    break;
                }
                Some(event) = self.rx.recv() => self.handle_during_shutdown(event),
            }
        }

        self.registry.clear();
    }

    fn handle_during_shutdown(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::ClientConnected { client } => {
                debug!(uid = %client.id(), "Refusing connection during shutdown");
                client.force_close();
            }
            ServerEvent::RegisterClient { reply_tx, .. }
            | ServerEvent::RenameClient { reply_tx, .. } => {
                let _ = reply_tx.send(false);
            }
            ServerEvent::DeregisterClient {
                nick,
                client_id,
                reply_tx,
            } => {
                self.deregister(&nick, client_id);
                let _ = reply_tx.send(());
            }
            ServerEvent::Shutdown { reply_tx, .. } => {
                let _ = reply_tx.send(());
            }
        }
    }
}
