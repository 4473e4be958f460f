//! Error types for the protocol library.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Errors raised while reading or framing lines.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A single line grew past the hard limit without a terminator.
    #[error("line too long: {actual} bytes without terminator (limit: {limit})")]
    LineTooLong {
        /// Raw bytes seen for the in-progress line.
        actual: usize,
        /// Configured hard ceiling.
        limit: usize,
    },
}

/// Reasons a line is not a well-formed message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// The line was empty.
    #[error("empty message")]
    EmptyMessage,

    /// A prefix was present but no command followed it.
    #[error("prefix without command")]
    MissingCommand,

    /// The prefix marker was not followed by a token.
    #[error("empty prefix")]
    EmptyPrefix,
}
