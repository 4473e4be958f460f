//! Nickname and user name grammar.
//!
//! ```text
//! nickname = ( letter / special ) *8( letter / digit / special / "-" )
//! special  = "[" / "]" / "\" / "`" / "_" / "^" / "{" / "|" / "}"
//! ```

/// Longest accepted nickname, in characters.
pub const MAX_NICK_LEN: usize = 9;

/// Name validation on string types.
pub trait NickExt {
    /// Check the nickname grammar, including the length cap.
    ///
    /// ```
    /// use relay_proto::NickExt;
    ///
    /// assert!("sam".is_valid_nick());
    /// assert!("[away]".is_valid_nick());
    /// assert!(!"1sam".is_valid_nick());
    /// assert!(!"toolongnick".is_valid_nick());
    /// ```
    fn is_valid_nick(&self) -> bool;

    /// Check the user name grammar: the nickname character rules with no
    /// length cap.
    fn is_valid_user(&self) -> bool;
}

/// `[ ] \ ` ^ _ { | }`
#[inline]
fn is_special(c: char) -> bool {
    matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}')
}

/// Whether `c` may appear at character position `index` of a name.
#[inline]
pub fn is_name_char(c: char, index: usize) -> bool {
    if index == 0 {
        c.is_ascii_alphabetic() || is_special(c)
    } else {
        c.is_ascii_alphanumeric() || is_special(c) || c == '-'
    }
}

fn is_valid_name(s: &str) -> bool {
    !s.is_empty() && s.chars().enumerate().all(|(i, c)| is_name_char(c, i))
}

impl NickExt for str {
    fn is_valid_nick(&self) -> bool {
        self.chars().count() <= MAX_NICK_LEN && is_valid_name(self)
    }

    fn is_valid_user(&self) -> bool {
        is_valid_name(self)
    }
}

impl NickExt for String {
    fn is_valid_nick(&self) -> bool {
        self.as_str().is_valid_nick()
    }

    fn is_valid_user(&self) -> bool {
        self.as_str().is_valid_user()
    }
}
