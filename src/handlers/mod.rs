//! Command handlers.
//!
//! Every verb is an entry in the [`CommandTable`]: a [`Handler`] plus the
//! minimum parameter count and the registration states it may run in. The
//! client actor dispatches each incoming message through the table and
//! renders any [`HandlerError`] as a reply.

mod connection;
mod core;

pub use self::connection::{
    NickHandler, PassHandler, PingHandler, PongHandler, QuitHandler, UserHandler,
};
pub use self::core::{CommandSpec, CommandTable, Context, Handler};
pub use crate::error::{HandlerError, HandlerResult};
