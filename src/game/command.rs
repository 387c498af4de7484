use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::{phrase::Phrase, state::Mode};

/// Everything a player (or host) can ask the engine to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    SelectLetter(char),
    SelectHint,
    SelectExtraGuess,
    ConfirmPurchase,
    EnterGuessMode,
    ExitGuessMode,
    InputGuessLetter(char),
    DeleteGuessLetter,
    SubmitGuess,
    StartNewRound { phrase: Phrase, category: String },
}

/// Why a command left the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("not allowed while {0}")]
    WrongMode(Mode),
    #[error("{0:?} is not a playable letter")]
    InvalidLetter(char),
    #[error("costs {cost} but bankroll is {bankroll}")]
    InsufficientFunds { cost: u32, bankroll: u32 },
    #[error("letter {0} is already fully revealed")]
    LetterLocked(char),
    #[error("letter {0} is not in the phrase")]
    LetterIncorrect(char),
    #[error("no guesses remaining")]
    NoGuessesRemaining,
    #[error("no purchase selected")]
    NothingPending,
    #[error("no guessed letters to delete")]
    NothingToDelete,
    #[error("guess is missing {missing} letters")]
    IncompleteGuess { missing: usize },
    #[error("every position is already revealed")]
    NoEditablePositions,
}

/// Failure to parse a typed command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("command {0:?} needs a single letter argument")]
    MissingLetter(String),
}

/// Parse one letter argument, accepting either case.
fn parse_letter(name: &str, arg: Option<&str>) -> Result<char, ParseCommandError> {
    let mut chars = arg.unwrap_or_default().chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch.to_ascii_uppercase()),
        _ => Err(ParseCommandError::MissingLetter(name.to_owned())),
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Parse the console syntax: `buy X`, `hint`, `extra`, `confirm`, `guess`,
    /// `exit`, `type X`, `delete`, `submit`. New rounds need a phrase from a
    /// provider, so they are not parsed here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();
        match name.as_str() {
            "buy" => Ok(Command::SelectLetter(parse_letter(&name, arg)?)),
            "hint" => Ok(Command::SelectHint),
            "extra" => Ok(Command::SelectExtraGuess),
            "confirm" => Ok(Command::ConfirmPurchase),
            "guess" => Ok(Command::EnterGuessMode),
            "exit" => Ok(Command::ExitGuessMode),
            "type" => Ok(Command::InputGuessLetter(parse_letter(&name, arg)?)),
            "delete" => Ok(Command::DeleteGuessLetter),
            "submit" => Ok(Command::SubmitGuess),
            _ => Err(ParseCommandError::Unknown(s.trim().to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, ParseCommandError};

    #[test]
    fn parse() {
        assert_eq!("buy c".parse::<Command>(), Ok(Command::SelectLetter('C')));
        assert_eq!("  TYPE Q ".parse::<Command>(), Ok(Command::InputGuessLetter('Q')));
        assert_eq!("confirm".parse::<Command>(), Ok(Command::ConfirmPurchase));
        assert_eq!("submit".parse::<Command>(), Ok(Command::SubmitGuess));
        assert_eq!(
            "buy".parse::<Command>(),
            Err(ParseCommandError::MissingLetter("buy".into()))
        );
        assert_eq!(
            "buy ab".parse::<Command>(),
            Err(ParseCommandError::MissingLetter("buy".into()))
        );
        assert_eq!(
            "dance".parse::<Command>(),
            Err(ParseCommandError::Unknown("dance".into()))
        );
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&Command::SelectLetter('A')).unwrap();
        assert_eq!(json, r#"{"select-letter":"A"}"#);
        let command: Command = serde_json::from_str(r#""confirm-purchase""#).unwrap();
        assert_eq!(command, Command::ConfirmPurchase);
    }
}
