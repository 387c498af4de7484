use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reasons a string can't be used as a puzzle phrase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhraseError {
    #[error("phrase is empty")]
    Empty,
    #[error("phrase contains invalid character {0:?}")]
    InvalidCharacter(char),
    #[error("phrase contains consecutive spaces")]
    DoubleSpace,
    #[error("phrase starts or ends with a space")]
    EdgeSpace,
}

/// The hidden phrase for a round: uppercase `A`-`Z` words separated by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phrase {
    chars: Vec<char>,
}

impl Phrase {
    /// Validate an already-normalized phrase.
    pub fn new(phrase: &str) -> Result<Self, PhraseError> {
        let chars = phrase.chars().collect::<Vec<char>>();
        if chars.is_empty() {
            return Err(PhraseError::Empty);
        }
        if let Some(ch) = chars
            .iter()
            .find(|ch| **ch != ' ' && !ch.is_ascii_uppercase())
        {
            return Err(PhraseError::InvalidCharacter(*ch));
        }
        if chars[0] == ' ' || chars[chars.len() - 1] == ' ' {
            return Err(PhraseError::EdgeSpace);
        }
        if chars.windows(2).any(|w| w[0] == ' ' && w[1] == ' ') {
            return Err(PhraseError::DoubleSpace);
        }
        Ok(Phrase { chars })
    }

    /// Uppercase, trim and collapse whitespace, then validate.
    pub fn normalize(raw: &str) -> Result<Self, PhraseError> {
        let normalized = raw
            .split_whitespace()
            .map(|word| word.to_uppercase())
            .collect::<Vec<String>>()
            .join(" ");
        Phrase::new(&normalized)
    }

    /// Number of characters, spaces included.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// The character at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Is the character at `index` a word separator?
    pub fn is_space(&self, index: usize) -> bool {
        self.chars.get(index) == Some(&' ')
    }

    /// Indices of every letter (non-space) position, ascending.
    pub fn letter_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.chars
            .iter()
            .enumerate()
            .filter(|(_, ch)| **ch != ' ')
            .map(|(i, _)| i)
    }

    /// Indices where `letter` occurs.
    pub fn positions_of(&self, letter: char) -> impl Iterator<Item = usize> + '_ {
        self.chars
            .iter()
            .enumerate()
            .filter(move |(_, ch)| **ch == letter)
            .map(|(i, _)| i)
    }

    pub fn contains(&self, letter: char) -> bool {
        letter != ' ' && self.chars.contains(&letter)
    }

    /// Each letter appearing in the phrase, once, in alphabetical order.
    pub fn distinct_letters(&self) -> Vec<char> {
        let mut letters = self
            .chars
            .iter()
            .copied()
            .filter(|ch| *ch != ' ')
            .collect::<Vec<char>>();
        letters.sort_unstable();
        letters.dedup();
        letters
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chars.iter().collect::<String>())
    }
}

impl TryFrom<String> for Phrase {
    type Error = PhraseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Phrase::new(&value)
    }
}

impl From<Phrase> for String {
    fn from(phrase: Phrase) -> Self {
        phrase.to_string()
    }
}
