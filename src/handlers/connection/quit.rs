//! QUIT command handler.

use async_trait::async_trait;
use relay_proto::Message;
use tracing::info;

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

/// Handler for QUIT command.
pub struct QuitHandler;

#[async_trait]
impl Handler for QuitHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        let reason = match msg.arg(0) {
            Some(text) => format!("Quit: {text}"),
            None => "Client Quit".to_string(),
        };

        info!(nick = %ctx.client.nick, reason = %reason, "Client quit");
        ctx.request_close(reason);
        Ok(())
    }
}
