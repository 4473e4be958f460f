//! Message parsing.
//!
//! The prefix and command are recognised with nom; parameters are split by
//! hand because the trailing marker is a plain `" :"` search, not a token.

use std::str::FromStr;

use nom::{
    bytes::complete::take_while1,
    character::complete::char,
    sequence::preceded,
    IResult,
};

use crate::error::MessageParseError;

use super::types::Message;

/// `:` followed by everything up to the next space.
fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// The command word: any token up to the next space. Whether the verb is
/// known is decided by the dispatcher, not the parser.
fn parse_command(input: &str) -> IResult<&str, &str> {
    take_while1(|c| c != ' ')(input)
}

/// Split what follows the command into parameters.
///
/// Runs of spaces between middle parameters collapse. The first `" :"`
/// starts the trailing parameter, which keeps its spaces verbatim.
fn split_params(input: &str) -> Vec<String> {
    let (middle, trailing) = match input.find(" :") {
        Some(pos) => (&input[..pos], Some(&input[pos + 2..])),
        None => (input, None),
    };

    let mut params: Vec<String> = middle
        .split(' ')
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect();

    if let Some(trailing) = trailing {
        params.push(trailing.to_owned());
    }

    params
}

impl FromStr for Message {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        let line = s.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        let (rest, prefix) = if line.starts_with(':') {
            let (rest, prefix) =
                parse_prefix(line).map_err(|_| MessageParseError::EmptyPrefix)?;
            (rest, Some(prefix))
        } else {
            (line, None)
        };

        let rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return Err(match prefix {
                Some(_) => MessageParseError::MissingCommand,
                None => MessageParseError::EmptyMessage,
            });
        }

        let (rest, command) =
            parse_command(rest).map_err(|_| MessageParseError::MissingCommand)?;

        Ok(Message {
            prefix: prefix.map(str::to_owned),
            command: command.to_owned(),
            params: split_params(rest),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Message {
        line.parse().unwrap()
    }

    #[test]
    fn parses_prefix_command_and_trailing() {
        let msg = parse(":nick!user@host PRIVMSG #chan :Hello there");
        assert_eq!(msg.prefix.as_deref(), Some("nick!user@host"));
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, vec!["#chan", "Hello there"]);
    }

    #[test]
    fn trailing_keeps_inner_spaces() {
        let msg = parse("PRIVMSG #go-nuts :Hello!  I love Go!");
        assert_eq!(msg.params, vec!["#go-nuts", "Hello!  I love Go!"]);
    }

    #[test]
    fn middle_params_before_trailing() {
        let msg = parse(":jamie!jamie@127.0.0.1 JOIN #go-nuts key1 #chan2 key2 :Extra param");
        assert_eq!(
            msg.params,
            vec!["#go-nuts", "key1", "#chan2", "key2", "Extra param"]
        );
    }

    #[test]
    fn bare_command() {
        let msg = parse("AWAY");
        assert_eq!(msg.prefix, None);
        assert_eq!(msg.command, "AWAY");
        assert!(msg.params.is_empty());

        let msg = parse(":jamie!jamie@127.0.0.1 AWAY");
        assert_eq!(msg.prefix.as_deref(), Some("jamie!jamie@127.0.0.1"));
        assert!(msg.params.is_empty());
    }

    #[test]
    fn trailing_directly_after_command() {
        let msg = parse("QUIT :gone fishing");
        assert_eq!(msg.params, vec!["gone fishing"]);
    }

    #[test]
    fn empty_trailing_is_a_param() {
        let msg = parse("TOPIC #chan :");
        assert_eq!(msg.params, vec!["#chan", ""]);
    }

    #[test]
    fn repeated_spaces_collapse() {
        let msg = parse("USER  guest   0 *  :Real Name");
        assert_eq!(msg.params, vec!["guest", "0", "*", "Real Name"]);
    }

    #[test]
    fn strips_line_terminator() {
        let msg = parse("PING :server\r\n");
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.params, vec!["server"]);
    }

    #[test]
    fn numeric_command() {
        let msg = parse(":irc.local 001 sam :Welcome");
        assert_eq!(msg.command, "001");
        assert_eq!(msg.params, vec!["sam", "Welcome"]);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!("".parse::<Message>(), Err(MessageParseError::EmptyMessage));
        assert_eq!("   ".parse::<Message>(), Err(MessageParseError::EmptyMessage));
        assert_eq!(
            ":nick!user@host".parse::<Message>(),
            Err(MessageParseError::MissingCommand)
        );
        assert_eq!(
            ":prefix ".parse::<Message>(),
            Err(MessageParseError::MissingCommand)
        );
        assert_eq!(": PING".parse::<Message>(), Err(MessageParseError::EmptyPrefix));
    }

    #[test]
    fn any_token_is_a_command() {
        for (line, command) in [
            ("FOO1 bar", "FOO1"),
            ("X-CMD a", "X-CMD"),
            ("1234 x", "1234"),
            ("PRIVMSG2 #c :hi", "PRIVMSG2"),
        ] {
            assert_eq!(parse(line).command, command, "{line}");
        }
        assert_eq!(parse("X-CMD a").params, vec!["a"]);
    }
}
