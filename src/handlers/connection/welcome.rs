//! Registration completion.

use relay_proto::Response;
use tracing::info;

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::Context;
use crate::state::RegistrationState;

/// Complete registration once nick and user are both set.
///
/// Checks the connection password, claims the nick with the server actor
/// and sends the welcome. Does nothing while either name is missing.
pub(super) async fn try_register(ctx: &mut Context<'_>) -> HandlerResult {
    if ctx.client.is_registered() || !ctx.client.has_nick() || !ctx.client.has_user() {
        return Ok(());
    }

    if let Some(expected) = ctx.info.password.as_deref()
        && ctx.client.password.as_deref() != Some(expected)
    {
        ctx.request_close("Bad password");
        return Err(HandlerError::PasswordMismatch);
    }

    let nick = ctx.client.nick.clone();
    if !ctx.server.register_client(&nick, ctx.handle).await? {
        return Err(HandlerError::NicknameInUse(nick));
    }

    ctx.client.state = RegistrationState::Registered;
    info!(nick = %nick, user = %ctx.client.user, host = %ctx.client.host, "Client registered");

    let text = format!(
        "Welcome to the Internet Relay Network {}",
        ctx.client.hostmask()
    );
    ctx.numeric(Response::RPL_WELCOME, &[text.as_str()]);
    Ok(())
}
