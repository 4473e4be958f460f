//! Protocol message type, parser and serializer.

mod parse;
mod serialize;
mod types;

pub use self::types::Message;
