//! The read loop: socket bytes to `IncomingMessage` events.

use relay_proto::{LineLimits, LineReader, Message, ReadErrorAction, classify_read_error};
use tokio::io::AsyncRead;
use tracing::{debug, warn};

use crate::state::{ClientEvent, ClientHandle};

/// Close reason for a peer that hung up.
pub(super) const PEER_RESET: &str = "Connection reset by peer";

/// Read lines until the stream ends or fails, then request a close.
///
/// Malformed lines are dropped. Transient errors are logged and reading
/// continues; anything else ends the loop.
pub(super) async fn read_loop<R>(reader: R, limits: LineLimits, handle: ClientHandle)
where
    R: AsyncRead + Unpin,
{
    let mut lines = LineReader::with_limits(reader, limits);

    let reason = loop {
        match lines.next_line().await {
            Ok(Some(line)) => match line.parse::<Message>() {
                Ok(msg) => {
                    if !handle.send(ClientEvent::IncomingMessage(msg)) {
                        return;
                    }
                }
                Err(e) => debug!(line = %line, error = %e, "Dropping malformed line"),
            },
            Ok(None) => break PEER_RESET.to_string(),
            Err(e) => match classify_read_error(&e) {
                ReadErrorAction::Retry => warn!(error = %e, "Transient read error"),
                ReadErrorAction::Close => break format!("Read error: {e}"),
            },
        }
    };

    debug!(reason = %reason, "Read loop ended");
    handle.request_close(reason);
}
