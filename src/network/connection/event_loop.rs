//! The client event loop.

use std::net::SocketAddr;

use futures_util::SinkExt;
use relay_proto::{IrcCodec, Message};
use tokio::io::{AsyncWrite, WriteHalf};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio_util::codec::FramedWrite;
use tracing::{debug, info, warn};

use super::ConnectionContext;
use crate::handlers::Context;
use crate::state::{Client, ClientEvent, ClientHandle, RegistrationState};

/// Owns a client's state and the write half of its socket.
pub(super) struct ClientActor<S> {
    client: Client,
    handle: ClientHandle,
    events: mpsc::UnboundedReceiver<ClientEvent>,
    writer: FramedWrite<WriteHalf<S>, IrcCodec>,
    reader: AbortHandle,
    ctx: ConnectionContext,
}

impl<S: AsyncWrite> ClientActor<S> {
    pub(super) fn new(
        addr: SocketAddr,
        handle: ClientHandle,
        events: mpsc::UnboundedReceiver<ClientEvent>,
        write_half: WriteHalf<S>,
        reader: AbortHandle,
        ctx: ConnectionContext,
    ) -> Self {
        Self {
            client: Client::new(handle.id(), addr),
            handle,
            events,
            writer: FramedWrite::new(write_half, IrcCodec::new()),
            reader,
            ctx,
        }
    }

    /// Process events until the connection is closed.
    pub(super) async fn run(mut self) {
        info!(addr = %self.client.addr, "Client connected");

        while let Some(event) = self.events.recv().await {
            match event {
                ClientEvent::Initialize => self.initialize().await,
                ClientEvent::IncomingMessage(msg) => self.handle_message(msg).await,
                ClientEvent::CloseRequested { reason, ack } => {
                    self.close(&reason).await;
                    if let Some(ack) = ack {
                        let _ = ack.send(());
                    }
                    break;
                }
            }
        }

        self.drain();
        info!(nick = %self.client.nick, "Client disconnected");
    }

    async fn initialize(&mut self) {
        self.notice("*** Looking up your hostname...").await;

        let ip = self.client.addr.ip();
        match self.ctx.resolver.lookup(ip).await {
            Ok(host) => {
                debug!(%ip, host = %host, "Resolved hostname");
                self.client.host = host;
                self.notice("*** Found your hostname").await;
            }
            Err(e) => {
                debug!(%ip, error = %e, "Hostname lookup failed");
                self.notice("*** Could not find your hostname.").await;
            }
        }
    }

    async fn handle_message(&mut self, msg: Message) {
        if self.client.is_closing() {
            debug!(command = %msg.command, "Ignoring message while closing");
            return;
        }

        let mut ctx = Context::new(
            &mut self.client,
            &self.handle,
            &self.ctx.server,
            &self.ctx.info,
        );
        let result = self.ctx.commands.dispatch(&mut ctx, &msg).await;
        let mut replies = ctx.replies;

        if let Err(e) = result
            && let Some(reply) = e.to_reply(&self.ctx.info.name, &self.client.nick)
        {
            replies.push(reply);
        }

        for reply in replies {
            self.write(reply).await;
        }
    }

    async fn notice(&mut self, text: &str) {
        let msg = Message::notice(&self.client.nick, text).with_prefix(self.ctx.info.name.as_str());
        self.write(msg).await;
    }

    /// Write one line. A failed write queues a close.
    async fn write(&mut self, msg: Message) {
        if let Err(e) = self.writer.send(msg).await {
            warn!(error = %e, "Write failed");
            self.client.state = RegistrationState::Closing;
            self.handle.request_close(format!("Write error: {e}"));
        }
    }

    /// Say goodbye, shut the socket and leave the registry.
    async fn close(&mut self, reason: &str) {
        info!(reason = %reason, "Closing connection");
        self.client.state = RegistrationState::Closing;

        let text = format!("Closing link {}: {}", self.client.nick, reason);
        if let Err(e) = self.writer.send(Message::error(&text)).await {
            debug!(error = %e, "Could not deliver closing line");
        }
        if let Err(e) = self.writer.close().await {
            debug!(error = %e, "Socket shutdown failed");
        }
        self.reader.abort();

        if let Err(e) = self
            .ctx
            .server
            .deregister_client(&self.client.nick, self.client.id)
            .await
        {
            warn!(error = %e, "Could not deregister");
        }
    }

    /// Acknowledge close requests that raced with the exit.
    fn drain(&mut self) {
        self.events.close();
        while let Ok(event) = self.events.try_recv() {
            if let ClientEvent::CloseRequested { ack: Some(ack), .. } = event {
                let _ = ack.send(());
            }
        }
    }
}
