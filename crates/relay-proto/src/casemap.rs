//! rfc1459 case mapping.
//!
//! Nicknames compare case-insensitively, with `[]\~` treated as the
//! uppercase forms of `{}|^`. The server folds names with [`irc_to_lower`]
//! before using them as registry keys.

/// Fold a single character with the rfc1459 mapping.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => (c as u8 + 32) as char,
        _ => c,
    }
}

/// Fold a string with the rfc1459 mapping.
pub fn irc_to_lower(s: &str) -> String {
    s.chars().map(irc_lower_char).collect()
}
