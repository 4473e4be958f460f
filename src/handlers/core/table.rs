//! Command dispatch table.

use std::collections::HashMap;

use relay_proto::Message;
use tracing::{Instrument, debug};

use super::context::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::connection::{
    NickHandler, PassHandler, PingHandler, PongHandler, QuitHandler, UserHandler,
};
use crate::telemetry::spans;

/// A verb's handler and the gates checked before it runs.
pub struct CommandSpec {
    pub handler: Box<dyn Handler>,
    /// Fewer parameters than this is a 461.
    pub min_params: usize,
    /// Usable after registration; otherwise 462.
    pub registered: bool,
    /// Usable before registration; otherwise 451.
    pub unregistered: bool,
}

impl CommandSpec {
    pub fn new(handler: impl Handler + 'static, min_params: usize) -> Self {
        Self {
            handler: Box::new(handler),
            min_params,
            registered: true,
            unregistered: true,
        }
    }

    /// Only before registration.
    pub fn pre_registration(mut self) -> Self {
        self.registered = false;
        self
    }

    /// Only after registration.
    pub fn post_registration(mut self) -> Self {
        self.unregistered = false;
        self
    }
}

/// Verb to [`CommandSpec`] map, read-only once built.
pub struct CommandTable {
    commands: HashMap<&'static str, CommandSpec>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandTable {
    /// The standard command set.
    pub fn new() -> Self {
        let mut table = Self::empty();

        table.insert("PASS", CommandSpec::new(PassHandler, 1).pre_registration());
        table.insert("NICK", CommandSpec::new(NickHandler, 1));
        table.insert("USER", CommandSpec::new(UserHandler, 4).pre_registration());
        table.insert("PING", CommandSpec::new(PingHandler, 1));
        table.insert("PONG", CommandSpec::new(PongHandler, 0));
        table.insert("QUIT", CommandSpec::new(QuitHandler, 0));

        table
    }

    pub fn empty() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Add or replace a verb. `verb` must be uppercase.
    pub fn insert(&mut self, verb: &'static str, spec: CommandSpec) {
        self.commands.insert(verb, spec);
    }

    /// Gate and run the handler for `msg`.
    pub async fn dispatch(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let verb = msg.command.to_ascii_uppercase();

        let Some(spec) = self.commands.get(verb.as_str()) else {
            return Err(HandlerError::UnknownCommand(verb));
        };
        if msg.params.len() < spec.min_params {
            return Err(HandlerError::NeedMoreParams(verb));
        }
        if ctx.client.is_registered() && !spec.registered {
            return Err(HandlerError::AlreadyRegistered);
        }
        if !ctx.client.is_registered() && !spec.unregistered {
            return Err(HandlerError::NotRegistered);
        }

        let span = spans::command(&verb, &ctx.client.nick);
        let result = spec.handler.handle(ctx, msg).instrument(span).await;
        if let Err(ref e) = result {
            debug!(command = %verb, error = %e, code = e.error_code(), "Command error");
        }
        result
    }
}
