//! # relay-proto
//!
//! Protocol primitives for the relayd chat server: the wire message codec,
//! the bounded line reader, nickname grammar and numeric reply codes.
//!
//! ## Parsing and serializing
//!
//! ```rust
//! use relay_proto::Message;
//!
//! let msg: Message = ":nick!user@host PRIVMSG #chan :Hello there".parse().unwrap();
//! assert_eq!(msg.prefix.as_deref(), Some("nick!user@host"));
//! assert_eq!(msg.command, "PRIVMSG");
//! assert_eq!(msg.params, vec!["#chan", "Hello there"]);
//! assert_eq!(msg.to_string(), ":nick!user@host PRIVMSG #chan :Hello there");
//! ```
//!
//! ## Reading lines
//!
//! With the default `tokio` feature, [`LineReader`] turns any `AsyncRead`
//! into a stream of bounded logical lines. Lines longer than the soft limit
//! are truncated; lines that never terminate within the hard limit fail with
//! [`ProtocolError::LineTooLong`].

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod error;
#[cfg(feature = "tokio")]
pub mod irc;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod nick;
pub mod response;
#[cfg(feature = "tokio")]
pub mod transport;

pub use self::casemap::{irc_lower_char, irc_to_lower};
pub use self::error::{MessageParseError, ProtocolError};
pub use self::message::Message;
pub use self::nick::{NickExt, MAX_NICK_LEN};
pub use self::response::Response;

#[cfg(feature = "tokio")]
pub use self::irc::IrcCodec;
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, LineLimits, HARD_LINE_LIMIT, SOFT_LINE_LIMIT};
#[cfg(feature = "tokio")]
pub use self::transport::{classify_read_error, LineReader, ReadErrorAction};
