//! Bounded line framing.
//!
//! [`LineCodec`] splits a byte stream on `\n` and enforces two limits on
//! every logical line:
//!
//! - the soft limit: content past it is dropped and the truncated line is
//!   still delivered;
//! - the hard limit: once an unterminated line has consumed more raw bytes
//!   than this, decoding fails with [`ProtocolError::LineTooLong`].
//!
//! Lines are decoded as UTF-8 lossily and never rejected for their encoding.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{self, ProtocolError};

/// Longest line content delivered, excluding the terminator.
pub const SOFT_LINE_LIMIT: usize = 510;

/// Raw bytes an unterminated line may consume before the stream is failed.
pub const HARD_LINE_LIMIT: usize = 32 * 1024;

/// Soft and hard limits for a [`LineCodec`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineLimits {
    /// Content bytes kept per line.
    pub soft: usize,
    /// Raw bytes allowed before a terminator.
    pub hard: usize,
}

impl Default for LineLimits {
    fn default() -> Self {
        Self {
            soft: SOFT_LINE_LIMIT,
            hard: HARD_LINE_LIMIT,
        }
    }
}

/// Newline-delimited codec with soft truncation and a hard ceiling.
#[derive(Debug, Default)]
pub struct LineCodec {
    limits: LineLimits,
    /// Index of next byte to check for newline
    next_index: usize,
    /// Bytes of the in-progress line already dropped past the soft limit
    discarded: usize,
}

impl LineCodec {
    /// Codec with the default 510 byte / 32 KiB limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec with custom limits.
    pub fn with_limits(limits: LineLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    fn reset(&mut self) {
        self.next_index = 0;
        self.discarded = 0;
    }

    fn too_long(&mut self, src: &mut BytesMut, actual: usize) -> ProtocolError {
        src.clear();
        self.reset();
        ProtocolError::LineTooLong {
            actual,
            limit: self.limits.hard,
        }
    }

    /// Turn raw line content (terminator removed) into the delivered string.
    fn finish(&self, mut content: &[u8]) -> String {
        if let [rest @ .., b'\r'] = content {
            content = rest;
        }
        if content.len() > self.limits.soft || self.discarded > 0 {
            tracing::debug!(
                kept = self.limits.soft.min(content.len()),
                dropped = self.discarded + content.len().saturating_sub(self.limits.soft),
                "line exceeded soft limit, truncating"
            );
            content = &content[..self.limits.soft.min(content.len())];
        }
        String::from_utf8_lossy(content).into_owned()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
            let end = self.next_index + offset;
            let raw = self.discarded + end;
            // Checked even with the terminator in hand, so the result does
            // not depend on where the peer's bytes were split into reads.
            if raw > self.limits.hard {
                return Err(self.too_long(src, raw));
            }

            let line = src.split_to(end + 1);
            let data = self.finish(&line[..end]);
            self.reset();
            return Ok(Some(data));
        }

        let raw = self.discarded + src.len();
        if raw > self.limits.hard {
            return Err(self.too_long(src, raw));
        }

        // One byte past the soft limit is kept so a `\r` sitting right at
        // the cap is still recognised once the `\n` arrives.
        let keep = self.limits.soft + 1;
        if src.len() > keep {
            self.discarded += src.len() - keep;
            src.truncate(keep);
        }
        self.next_index = src.len();

        Ok(None)
    }

    /// A final unterminated line is delivered as-is.
    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if src.is_empty() {
            self.reset();
            return Ok(None);
        }

        let line = src.split();
        let data = self.finish(&line);
        self.reset();
        Ok(Some(data))
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> error::Result<()> {
        dst.extend_from_slice(msg.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> LineCodec {
        LineCodec::with_limits(LineLimits { soft: 8, hard: 32 })
    }

    #[test]
    fn decodes_complete_line_and_strips_crlf() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :test\r\nNICK sam\n");

        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("PING :test"));
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("NICK sam"));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn partial_line_waits_for_terminator() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :");
        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"later\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("PING :later"));
    }

    #[test]
    fn only_one_carriage_return_is_stripped() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("a\r\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("a\r"));
    }

    #[test]
    fn soft_limit_truncates_in_one_chunk() {
        let mut codec = small();
        let mut buf = BytesMut::from("abcdefghijkl\r\nnext\n");
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("abcdefgh"));
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("next"));
    }

    #[test]
    fn soft_limit_truncates_across_chunks() {
        let mut codec = small();
        let mut buf = BytesMut::from("abcdefghijkl");
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert!(buf.len() <= 9);

        buf.extend_from_slice(b"mnop\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap().as_deref(), Some("abcdefgh"));
        assert!(buf.is_empty());
    }

    #[test]
    fn default_soft_limit_is_510() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(format!("{}\r\n", "x".repeat(600)).as_str());
        let line = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(line.len(), SOFT_LINE_LIMIT);
    }

    #[test]
    fn hard_limit_fails_unterminated_line() {
        let mut codec = small();
        let mut buf = BytesMut::new();
        for _ in 0..3 {
            buf.extend_from_slice(b"0123456789");
            assert_eq!(codec.decode(&mut buf).unwrap(), None);
        }
        buf.extend_from_slice(b"0123456789");
        match codec.decode(&mut buf) {
            Err(ProtocolError::LineTooLong { actual, limit }) => {
                assert_eq!(limit, 32);
                assert_eq!(actual, 40);
            }
            other => panic!("expected LineTooLong, got {other:?}"),
        }
    }

    #[test]
    fn hard_limit_ignores_chunking() {
        let line = format!("{}\r\n", "y".repeat(40));

        let mut whole = small();
        let mut buf = BytesMut::from(line.as_str());
        assert!(matches!(
            whole.decode(&mut buf),
            Err(ProtocolError::LineTooLong { actual: 41, limit: 32 })
        ));

        let mut split = small();
        let mut buf = BytesMut::from(&line[..20]);
        assert_eq!(split.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(line[20..].as_bytes());
        assert!(matches!(
            split.decode(&mut buf),
            Err(ProtocolError::LineTooLong { actual: 41, limit: 32 })
        ));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"NICK s\xffm\r\n"[..]);
        assert_eq!(
            codec.decode(&mut buf).unwrap().as_deref(),
            Some("NICK s\u{FFFD}m")
        );
    }

    #[test]
    fn eof_delivers_trailing_partial_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("QUIT");
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert_eq!(codec.decode_eof(&mut buf).unwrap().as_deref(), Some("QUIT"));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }

    #[test]
    fn encode_passes_bytes_through() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();
        codec.encode("PONG :test\r\n".to_string(), &mut buf).unwrap();
        assert_eq!(&buf[..], b"PONG :test\r\n");
    }
}
