//! Client-side actor types: the event queue, the handle other actors hold,
//! and the per-connection state owned by the event loop.

use std::net::SocketAddr;

use chrono::{DateTime, Utc};
use relay_proto::Message;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Placeholder for an unset nick, user or real name.
pub const PLACEHOLDER: &str = "*";

/// Events processed by a client's event loop, in arrival order.
#[derive(Debug)]
pub enum ClientEvent {
    /// First event of every client: hostname lookup and greeting notices.
    Initialize,
    /// A parsed line from the read loop.
    IncomingMessage(Message),
    /// Close the connection. `ack` fires once the client has deregistered.
    CloseRequested {
        reason: String,
        ack: Option<oneshot::Sender<()>>,
    },
}

/// Cloneable address of a client actor.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    id: Uuid,
    events: mpsc::UnboundedSender<ClientEvent>,
    cancel: CancellationToken,
}

impl ClientHandle {
    pub fn new(id: Uuid, events: mpsc::UnboundedSender<ClientEvent>) -> Self {
        Self {
            id,
            events,
            cancel: CancellationToken::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Queue an event. Returns false once the event loop has exited.
    pub fn send(&self, event: ClientEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// Queue a close without waiting for it.
    pub fn request_close(&self, reason: impl Into<String>) -> bool {
        self.send(ClientEvent::CloseRequested {
            reason: reason.into(),
            ack: None,
        })
    }

    /// Queue a close and return the acknowledgement receiver, or `None` if
    /// the client is already gone.
    pub fn close(&self, reason: impl Into<String>) -> Option<oneshot::Receiver<()>> {
        let (ack, rx) = oneshot::channel();
        let sent = self.send(ClientEvent::CloseRequested {
            reason: reason.into(),
            ack: Some(ack),
        });
        sent.then_some(rx)
    }

    /// Tear the connection down without the close handshake.
    pub fn force_close(&self) {
        self.cancel.cancel();
    }

    /// Token cancelled by [`ClientHandle::force_close`].
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// Registration state machine: `Unregistered -> Registered -> Closing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    Registered,
    /// Terminal. Incoming messages are ignored.
    Closing,
}

/// State owned exclusively by one client's event loop.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: Uuid,
    pub addr: SocketAddr,
    pub state: RegistrationState,
    pub nick: String,
    /// Stored with the `~` ident prefix.
    pub user: String,
    pub realname: String,
    /// Resolved hostname, or the literal address until lookup succeeds.
    pub host: String,
    /// Sent with PASS before registration.
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn new(id: Uuid, addr: SocketAddr) -> Self {
        Self {
            id,
            addr,
            state: RegistrationState::Unregistered,
            nick: PLACEHOLDER.to_string(),
            user: PLACEHOLDER.to_string(),
            realname: PLACEHOLDER.to_string(),
            host: addr.ip().to_string(),
            password: None,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        self.state == RegistrationState::Registered
    }

    #[inline]
    pub fn is_closing(&self) -> bool {
        self.state == RegistrationState::Closing
    }

    pub fn has_nick(&self) -> bool {
        self.nick != PLACEHOLDER
    }

    pub fn has_user(&self) -> bool {
        self.user != PLACEHOLDER
    }

    /// `nick!user@host`
    pub fn hostmask(&self) -> String {
        format!("{}!{}@{}", self.nick, self.user, self.host)
    }
}
