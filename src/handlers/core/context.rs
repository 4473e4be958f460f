//! Handler context and trait.

use async_trait::async_trait;
use relay_proto::{Message, Response};

use crate::error::{HandlerResult, numeric};
use crate::state::{Client, ClientHandle, RegistrationState, ServerHandle, ServerInfo};

/// Everything a handler may touch while processing one message.
///
/// Replies are collected in order and written by the client actor once the
/// handler returns.
pub struct Context<'a> {
    /// The client's own state, owned by its event loop.
    pub client: &'a mut Client,
    /// The client's own handle, used for registry claims and self-close.
    pub handle: &'a ClientHandle,
    /// The server actor.
    pub server: &'a ServerHandle,
    /// Shared server identity.
    pub info: &'a ServerInfo,
    /// Lines queued for this client.
    pub replies: Vec<Message>,
}

impl<'a> Context<'a> {
    pub fn new(
        client: &'a mut Client,
        handle: &'a ClientHandle,
        server: &'a ServerHandle,
        info: &'a ServerInfo,
    ) -> Self {
        Self {
            client,
            handle,
            server,
            info,
            replies: Vec::new(),
        }
    }

    /// Queue a line as-is.
    pub fn reply(&mut self, msg: Message) {
        self.replies.push(msg);
    }

    /// Queue a line originating from the server.
    pub fn server_reply(&mut self, msg: Message) {
        let msg = msg.with_prefix(self.info.name.as_str());
        self.replies.push(msg);
    }

    /// Queue `:<server> <code> <nick> <args...>`.
    pub fn numeric(&mut self, code: Response, args: &[&str]) {
        let msg = numeric(code, &self.client.nick, args);
        self.server_reply(msg);
    }

    /// Queue a server notice to this client.
    pub fn notice(&mut self, text: &str) {
        let msg = Message::notice(&self.client.nick, text);
        self.server_reply(msg);
    }

    /// Enter the closing state and queue the close for the event loop.
    pub fn request_close(&mut self, reason: impl Into<String>) {
        self.client.state = RegistrationState::Closing;
        self.handle.request_close(reason);
    }
}

/// A command handler.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult;
}
