//! Numeric reply codes sent by the server.

#![allow(non_camel_case_types)]

use std::fmt;

/// Server numeric reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    /// 001 - Registration complete
    RPL_WELCOME = 1,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
    /// 432 - Nickname fails the grammar
    ERR_ERRONEOUSNICKNAME = 432,
    /// 433 - Nickname already registered
    ERR_NICKNAMEINUSE = 433,
    /// 451 - Command requires registration
    ERR_NOTREGISTERED = 451,
    /// 461 - Too few parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 462 - Command not allowed after registration
    ERR_ALREADYREGISTERED = 462,
    /// 464 - Connection password mismatch
    ERR_PASSWDMISMATCH = 464,
}

impl Response {
    /// Numeric value of the code.
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Always three digits, zero padded.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}
