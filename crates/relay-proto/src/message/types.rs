//! The owned protocol message.

/// A single protocol line in structured form.
///
/// `params` holds every parameter in order; the trailing parameter is not
/// stored separately; it is simply the last element. Whether it needs the
/// `:` marker on the wire is decided at serialization time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    /// Origin of the message, without the leading `:`.
    pub prefix: Option<String>,
    /// Command verb or three-digit numeric.
    pub command: String,
    /// Parameters, the last of which may contain spaces.
    pub params: Vec<String>,
}

impl Message {
    /// Build a message without a prefix.
    pub fn new<C, I, P>(command: C, params: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            prefix: None,
            command: command.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Attach an origin prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// `NOTICE <target> :<text>`
    pub fn notice(target: &str, text: &str) -> Self {
        Self::new("NOTICE", [target, text])
    }

    /// `ERROR :<text>`
    pub fn error(text: &str) -> Self {
        Self::new("ERROR", [text])
    }

    /// `NICK <nick>`
    pub fn nick(nick: &str) -> Self {
        Self::new("NICK", [nick])
    }

    /// `PONG <server> <token>`
    pub fn pong(server: &str, token: &str) -> Self {
        Self::new("PONG", [server, token])
    }

    /// Parameter at `index`, if present.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }
}
