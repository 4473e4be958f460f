//! NICK command handler.

use async_trait::async_trait;
use relay_proto::{Message, NickExt};
use tracing::debug;

use super::welcome::try_register;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};

/// Handler for NICK command.
///
/// Before registration this sets the pending nick, registering if USER was
/// already sent. Afterwards it renames through the server actor.
pub struct NickHandler;

#[async_trait]
impl Handler for NickHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // NICK <nickname>
        let nick = msg.arg(0).unwrap_or_default();
        if !nick.is_valid_nick() {
            return Err(HandlerError::ErroneousNickname(nick.to_string()));
        }

        if ctx.client.is_registered() {
            return rename(ctx, nick).await;
        }

        if !ctx.client.has_user() {
            debug!(nick, "Pending nick set");
            ctx.client.nick = nick.to_string();
            return Ok(());
        }

        // Claim the candidate; on collision the pending nick stays as it was.
        let previous = std::mem::replace(&mut ctx.client.nick, nick.to_string());
        let result = try_register(ctx).await;
        if let Err(HandlerError::NicknameInUse(_)) = result {
            ctx.client.nick = previous;
        }
        result
    }
}

async fn rename(ctx: &mut Context<'_>, new: &str) -> HandlerResult {
    if new == ctx.client.nick {
        return Ok(());
    }

    let old = ctx.client.nick.clone();
    if !ctx.server.rename_client(&old, new, ctx.handle).await? {
        return Err(HandlerError::NicknameInUse(new.to_string()));
    }

    debug!(old = %old, new, "Nick changed");
    let line = Message::nick(new).with_prefix(ctx.client.hostmask());
    ctx.client.nick = new.to_string();
    ctx.reply(line);
    Ok(())
}
