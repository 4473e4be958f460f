//! Reading bounded lines from an async byte stream.
//!
//! [`LineReader`] drives a [`LineCodec`] by hand instead of through
//! `FramedRead`: a framed stream is finished after its first error, while a
//! connection must keep reading after a transient I/O failure.

use std::io;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::codec::Decoder;

use crate::error::{self, ProtocolError};
use crate::line::{LineCodec, LineLimits};

const READ_CHUNK: usize = 4096;

/// What a reader should do after an error from [`LineReader::next_line`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadErrorAction {
    /// Log and call `next_line` again.
    Retry,
    /// Stop reading and close the connection.
    Close,
}

/// Sort a read failure into transient or permanent.
///
/// `Interrupted`, `WouldBlock` and `TimedOut` are transient. Everything else,
/// including a line over the hard limit, is permanent.
pub fn classify_read_error(err: &ProtocolError) -> ReadErrorAction {
    match err {
        ProtocolError::Io(e) => match e.kind() {
            io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
                ReadErrorAction::Retry
            }
            _ => ReadErrorAction::Close,
        },
        _ => ReadErrorAction::Close,
    }
}

/// Logical lines from any `AsyncRead`.
pub struct LineReader<R> {
    inner: R,
    codec: LineCodec,
    buf: BytesMut,
    eof: bool,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Reader with the default line limits.
    pub fn new(inner: R) -> Self {
        Self::with_limits(inner, LineLimits::default())
    }

    /// Reader with custom line limits.
    pub fn with_limits(inner: R, limits: LineLimits) -> Self {
        Self {
            inner,
            codec: LineCodec::with_limits(limits),
            buf: BytesMut::with_capacity(READ_CHUNK),
            eof: false,
        }
    }

    /// Next complete line, or `None` at end of stream.
    ///
    /// Buffered bytes survive an error, so after a
    /// [`ReadErrorAction::Retry`] the caller simply calls this again.
    pub async fn next_line(&mut self) -> error::Result<Option<String>> {
        loop {
            if let Some(line) = self.codec.decode(&mut self.buf)? {
                return Ok(Some(line));
            }
            if self.eof {
                return self.codec.decode_eof(&mut self.buf);
            }

            self.buf.reserve(READ_CHUNK);
            if self.inner.read_buf(&mut self.buf).await? == 0 {
                self.eof = true;
            }
        }
    }
}
