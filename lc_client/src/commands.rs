use std::fmt;

/// A request the client sends to the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Seed the pool with `sum`.
    Init { sum: String },
    /// Invoke a chaincode function.
    Invoke { function: String, args: Vec<String> },
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No command given.
    MissingCommand,
    /// `init` without a sum.
    InitMissingSum,
    /// `init` with more than one argument.
    InitTooManyArguments(usize),
    /// `invoke` without a function name.
    InvokeMissingFunction,
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCommand => write!(
                f,
                "Missing command. Use 'init <sum>' or 'invoke <function> [args...]'"
            ),
            Self::InitMissingSum => write!(f, "Init requires a sum (e.g., 'init 1000')"),
            Self::InitTooManyArguments(count) => {
                write!(f, "Init takes exactly one sum, got {} arguments", count)
            }
            Self::InvokeMissingFunction => write!(
                f,
                "Invoke requires a function name (e.g., 'invoke lottery alice 700')"
            ),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Use 'init' or 'invoke'",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse the positional command-line words into a [`Command`].
///
/// Arguments after the function name are passed through untouched; the
/// chaincode validates them.
///
/// # Examples
///
/// ```
/// use lc_client::commands::{Command, parse_command};
///
/// let words = ["invoke", "lottery", "alice", "700"].map(String::from);
/// assert_eq!(
///     parse_command(&words),
///     Ok(Command::Invoke {
///         function: "lottery".into(),
///         args: vec!["alice".into(), "700".into()],
///     })
/// );
///
/// let words = ["init", "1000"].map(String::from);
/// assert_eq!(parse_command(&words), Ok(Command::Init { sum: "1000".into() }));
/// ```
pub fn parse_command(words: &[String]) -> Result<Command, ParseError> {
    let Some((command, rest)) = words.split_first() else {
        return Err(ParseError::MissingCommand);
    };

    match command.as_str() {
        "init" => match rest {
            [] => Err(ParseError::InitMissingSum),
            [sum] => Ok(Command::Init { sum: sum.clone() }),
            _ => Err(ParseError::InitTooManyArguments(rest.len())),
        },
        "invoke" => match rest.split_first() {
            Some((function, args)) => Ok(Command::Invoke {
                function: function.clone(),
                args: args.to_vec(),
            }),
            None => Err(ParseError::InvokeMissingFunction),
        },
        other => Err(ParseError::UnrecognizedCommand(other.to_string())),
    }
}
