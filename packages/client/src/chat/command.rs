//! Parsing of prompt input.

use thiserror::Error;

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/join <room>`
    Join(String),
    /// `/typing`
    Typing,
    /// `/sub <user>`
    Subscribe(String),
    /// `/quit`
    Quit,
    /// `/help`
    Help,
    /// Anything not starting with `/`: a chat message to the current room
    Say(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error("Unknown command '{0}' (try /help)")]
    Unknown(String),
}

pub const HELP: &str = "\
/join <room>   join a chat room and make it current
/typing        tell the current room you are typing
/sub <user>    receive notifications for <user>
/quit          leave
<text>         send a message to the current room
";

/// Parse a trimmed, non-empty input line
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Say(line.to_string()));
    };

    let (name, argument) = match rest.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (rest, ""),
    };

    match name {
        "join" if argument.is_empty() => Err(CommandError::MissingArgument("/join <room>")),
        "join" => Ok(Command::Join(argument.to_string())),
        "typing" => Ok(Command::Typing),
        "sub" if argument.is_empty() => Err(CommandError::MissingArgument("/sub <user>")),
        "sub" => Ok(Command::Subscribe(argument.to_string())),
        "quit" | "exit" => Ok(Command::Quit),
        "help" => Ok(Command::Help),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
