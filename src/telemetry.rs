//! Standardized span constructors.

pub mod spans {
    use std::net::SocketAddr;

    use tracing::{Span, debug_span, info_span};
    use uuid::Uuid;

    /// Create a span for a client connection.
    pub fn connection(uid: &Uuid, addr: &SocketAddr) -> Span {
        info_span!("connection", uid = %uid, addr = %addr)
    }

    /// Create a span for one listener's accept loop.
    pub fn listener(addr: &SocketAddr, tls: bool) -> Span {
        info_span!("listener", addr = %addr, tls)
    }

    /// Create a span for a command execution.
    pub fn command(name: &str, nick: &str) -> Span {
        debug_span!("command", name = %name, nick = %nick)
    }
}
