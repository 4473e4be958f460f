//! Connection - the Client Actor for one accepted stream.
//!
//! Each connection runs two tasks joined by the client's event queue:
//!
//! ```text
//!   socket ──▶ [read loop] ──IncomingMessage──▶ ┌────────────┐
//!                                               │ event loop │──▶ FramedWrite ──▶ socket
//!   server actor ──────────CloseRequested─────▶ └────────────┘
//! ```
//!
//! The read loop only parses and forwards. Every client-owned field is
//! touched by the event loop alone, so no per-client lock exists.

mod event_loop;
mod reader;

use std::net::SocketAddr;
use std::sync::Arc;

use relay_proto::LineLimits;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tracing::{Instrument, warn};
use uuid::Uuid;

use crate::handlers::CommandTable;
use crate::network::resolver::HostResolver;
use crate::state::{ClientEvent, ClientHandle, ServerHandle, ServerInfo};
use crate::telemetry::spans;

use event_loop::ClientActor;

/// Shared pieces every connection needs.
#[derive(Clone)]
pub struct ConnectionContext {
    pub server: ServerHandle,
    pub info: Arc<ServerInfo>,
    pub commands: Arc<CommandTable>,
    pub resolver: Arc<dyn HostResolver>,
    pub limits: LineLimits,
}

/// Start the actor for an accepted stream and return its handle.
///
/// `Initialize` is queued before either task starts, so it is always the
/// first event processed.
pub fn spawn_client<S>(stream: S, addr: SocketAddr, ctx: ConnectionContext) -> ClientHandle
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let id = Uuid::new_v4();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let handle = ClientHandle::new(id, events_tx);
    handle.send(ClientEvent::Initialize);

    if !ctx.server.client_connected(&handle) {
        warn!(%addr, "Server actor is gone, dropping connection");
        return handle;
    }

    let span = spans::connection(&id, &addr);
    let (read_half, write_half) = tokio::io::split(stream);

    let reader = tokio::spawn(
        reader::read_loop(read_half, ctx.limits, handle.clone()).instrument(span.clone()),
    );
    let reader_abort = reader.abort_handle();

    let actor = ClientActor::new(
        addr,
        handle.clone(),
        events_rx,
        write_half,
        reader.abort_handle(),
        ctx,
    );
    let cancel = handle.cancel_token();

    tokio::spawn(
        async move {
            tokio::select! {
                _ = actor.run() => {}
                _ = cancel.cancelled() => {
                    warn!("Connection force-closed");
                    reader_abort.abort();
                }
            }
        }
        .instrument(span),
    );

    handle
}
