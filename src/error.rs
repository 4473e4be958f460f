//! Error types for command handling and actor messaging.

use relay_proto::{Message, Response};
use thiserror::Error;

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("not enough parameters for {0}")]
    NeedMoreParams(String),

    #[error("already registered")]
    AlreadyRegistered,

    #[error("not registered")]
    NotRegistered,

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("password mismatch")]
    PasswordMismatch,

    #[error("invalid user name: {0}")]
    InvalidUsername(String),

    #[error(transparent)]
    ServerGone(#[from] ServerGone),
}

impl HandlerError {
    /// Static label for structured logging.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => "unknown_command",
            Self::NeedMoreParams(_) => "need_more_params",
            Self::AlreadyRegistered => "already_registered",
            Self::NotRegistered => "not_registered",
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::PasswordMismatch => "password_mismatch",
            Self::InvalidUsername(_) => "invalid_username",
            Self::ServerGone(_) => "server_gone",
        }
    }

    /// Render the client-visible reply.
    ///
    /// Errors with a numeric become that numeric; the rest become a server
    /// `NOTICE`. Returns `None` when the client should see nothing.
    pub fn to_reply(&self, server_name: &str, nick: &str) -> Option<Message> {
        let msg = match self {
            Self::UnknownCommand(verb) => numeric(
                Response::ERR_UNKNOWNCOMMAND,
                nick,
                &[verb.as_str(), "Unknown command"],
            ),
            Self::NeedMoreParams(verb) => numeric(
                Response::ERR_NEEDMOREPARAMS,
                nick,
                &[verb.as_str(), "Not enough parameters"],
            ),
            Self::AlreadyRegistered => numeric(
                Response::ERR_ALREADYREGISTERED,
                nick,
                &["Unauthorized command (already registered)"],
            ),
            Self::NotRegistered => {
                numeric(Response::ERR_NOTREGISTERED, nick, &["You have not registered"])
            }
            Self::ErroneousNickname(bad) => numeric(
                Response::ERR_ERRONEOUSNICKNAME,
                nick,
                &[bad.as_str(), "Erroneous nickname"],
            ),
            Self::NicknameInUse(bad) => numeric(
                Response::ERR_NICKNAMEINUSE,
                nick,
                &[bad.as_str(), "Nickname is already in use"],
            ),
            Self::PasswordMismatch => {
                numeric(Response::ERR_PASSWDMISMATCH, nick, &["Password incorrect"])
            }
            Self::InvalidUsername(_) => Message::notice(nick, "Invalid user name given"),

            Self::ServerGone(_) => return None,
        };

        Some(msg.with_prefix(server_name))
    }
}

/// Build `<code> <nick> <args...>` without a prefix.
pub fn numeric(code: Response, nick: &str, args: &[&str]) -> Message {
    let mut params = Vec::with_capacity(args.len() + 1);
    params.push(nick);
    params.extend_from_slice(args);
    Message::new(code.to_string(), params)
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// The server actor has stopped and its mailbox is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("server actor is gone")]
pub struct ServerGone;
