//! USER command handler.

use async_trait::async_trait;
use relay_proto::{Message, NickExt};
use tracing::debug;

use super::welcome::try_register;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};

/// Handler for USER command.
pub struct UserHandler;

#[async_trait]
impl Handler for UserHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // USER <username> <mode> <unused> <realname>
        let username = msg.arg(0).unwrap_or_default();
        let realname = msg.arg(3).unwrap_or_default();

        if !username.is_valid_user() {
            return Err(HandlerError::InvalidUsername(username.to_string()));
        }

        ctx.client.user = format!("~{username}");
        ctx.client.realname = realname.to_string();
        debug!(user = %ctx.client.user, realname, "User set");

        try_register(ctx).await
    }
}
