//! PASS command handler.

use async_trait::async_trait;
use relay_proto::Message;

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};

/// Handler for PASS command. The password is checked at registration.
pub struct PassHandler;

#[async_trait]
impl Handler for PassHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &Message) -> HandlerResult {
        ctx.client.password = msg.arg(0).map(str::to_string);
        Ok(())
    }
}
