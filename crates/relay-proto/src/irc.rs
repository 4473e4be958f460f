//! Outgoing message codec for tokio.
//!
//! Serializes [`Message`] values through [`LineCodec`], terminated with
//! `\r\n`. Incoming lines are read with [`LineReader`](crate::LineReader).

use bytes::BytesMut;
use tokio_util::codec::Encoder;

use crate::error::{self, ProtocolError};
use crate::line::LineCodec;
use crate::message::Message;

/// Tokio encoder for [`Message`] values.
#[derive(Debug, Default)]
pub struct IrcCodec {
    inner: LineCodec,
}

impl IrcCodec {
    /// A fresh encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cut outgoing data at its first line break.
    pub fn sanitize(mut data: String) -> String {
        if let Some(pos) = data.find(['\r', '\n']) {
            data.truncate(pos);
        }
        data
    }
}

impl Encoder<Message> for IrcCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> error::Result<()> {
        let mut line = Self::sanitize(msg.to_string());
        line.push_str("\r\n");
        self.inner.encode(line, dst)
    }
}
