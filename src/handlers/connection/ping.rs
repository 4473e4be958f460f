//! PING and PONG handlers.

use async_trait::async_trait;
use relay_proto::Message;

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

/// Handler for PING command.
pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        // PING <token>
        let token = msg.arg(0).unwrap_or_default();
        let pong = Message::pong(&ctx.info.name, token);
        ctx.server_reply(pong);
        Ok(())
    }
}

/// Handler for PONG command.
pub struct PongHandler;

#[async_trait]
impl Handler for PongHandler {
    async fn handle(&self, _ctx: &mut Context<'_>, _msg: &Message) -> HandlerResult {
        Ok(())
    }
}
