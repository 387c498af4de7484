use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum::{Display, EnumIter};

use super::{
    config::EconomyConfig,
    costs::{letter_cost, EXTRA_GUESS_COST, HINT_COST},
    phrase::Phrase,
};

/// Where the round currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    /// Nothing selected, waiting for the player.
    #[default]
    Idle,
    /// A purchase has been selected and awaits confirmation.
    PurchasePending,
    /// The player is typing a full guess.
    GuessMode,
    /// Every letter is revealed. Terminal until a new round.
    Won,
    /// Out of guesses and money. Terminal until a new round.
    Lost,
}

impl Mode {
    /// `Won` or `Lost`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Mode::Won | Mode::Lost)
    }
}

/// Something the player can buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Purchase {
    /// Reveal every occurrence of a letter.
    Letter(char),
    /// Reveal one random hidden position.
    Hint,
    /// One more full-guess submission.
    ExtraGuess,
}

impl Purchase {
    /// Price of this purchase, or `None` for a letter outside `A`-`Z`.
    pub fn cost(&self) -> Option<u32> {
        match self {
            Purchase::Letter(letter) => letter_cost(*letter),
            Purchase::Hint => Some(HINT_COST),
            Purchase::ExtraGuess => Some(EXTRA_GUESS_COST),
        }
    }
}

/// Complete state of one round.
///
/// Fields are public for reading. Hosts must change a round only through
/// commands (`GameState::apply` or `reduce`) so the invariants keep holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// The hidden phrase.
    pub phrase: Phrase,
    /// Display-only hint about the phrase (e.g. "Person").
    pub category: String,
    /// Money available to spend.
    pub bankroll: u32,
    /// Full-guess submissions left.
    pub guesses_remaining: u32,
    /// Positions confirmed correct, mapped to the phrase character there.
    pub revealed: BTreeMap<usize, char>,
    /// Tentative guess-mode input, not yet checked.
    pub pending_guess: BTreeMap<usize, char>,
    /// Letters whose every occurrence is revealed.
    pub locked_letters: BTreeSet<char>,
    /// Letters bought that don't occur in the phrase.
    pub incorrect_purchases: BTreeSet<char>,
    /// Current state machine state.
    pub mode: Mode,
    /// Selection awaiting confirmation.
    pub pending_purchase: Option<Purchase>,
    /// Positions already reported as newly revealed.
    pub shaken: BTreeSet<usize>,
}

impl GameState {
    /// A fresh round on the given phrase.
    pub fn new(phrase: Phrase, category: impl Into<String>, config: &EconomyConfig) -> Self {
        GameState {
            phrase,
            category: category.into(),
            bankroll: config.starting_bankroll,
            guesses_remaining: config.starting_guesses,
            revealed: BTreeMap::new(),
            pending_guess: BTreeMap::new(),
            locked_letters: BTreeSet::new(),
            incorrect_purchases: BTreeSet::new(),
            mode: Mode::Idle,
            pending_purchase: None,
            shaken: BTreeSet::new(),
        }
    }

    /// Is `position` showing its phrase character?
    pub fn is_revealed(&self, position: usize) -> bool {
        self.revealed.contains_key(&position)
    }

    /// Has this letter been ruled out, either by a lock or a wrong purchase?
    pub fn is_letter_blocked(&self, letter: char) -> bool {
        self.locked_letters.contains(&letter) || self.incorrect_purchases.contains(&letter)
    }

    /// Mark a position as revealed. Returns whether this is the first time it has
    /// been reported, so the caller can animate it.
    pub(crate) fn reveal(&mut self, position: usize) -> bool {
        let Some(ch) = self.phrase.get(position) else {
            return false;
        };
        if ch == ' ' {
            return false;
        }
        self.revealed.insert(position, ch);
        self.shaken.insert(position)
    }
}

#[cfg(test)]
mod tests {
    use super::{GameState, Mode, Purchase};
    use crate::game::{config::EconomyConfig, phrase::Phrase};
    use strum::IntoEnumIterator;

    #[test]
    fn new_state() {
        let state = GameState::new(
            Phrase::new("CAT").unwrap(),
            "Animal",
            &EconomyConfig::default(),
        );
        assert_eq!(state.bankroll, 1000);
        assert_eq!(state.guesses_remaining, 2);
        assert_eq!(state.mode, Mode::Idle);
        assert!(state.revealed.is_empty());
    }

    #[test]
    fn reveal_reports_once() {
        let mut state = GameState::new(
            Phrase::new("A B").unwrap(),
            "Letters",
            &EconomyConfig::default(),
        );
        assert!(state.reveal(0));
        assert!(!state.reveal(0));
        assert!(!state.reveal(1));
        assert!(!state.reveal(7));
        assert_eq!(state.revealed.len(), 1);
    }

    #[test]
    fn terminal_modes() {
        let terminal = Mode::iter().filter(|m| m.is_terminal()).collect::<Vec<_>>();
        assert_eq!(terminal, vec![Mode::Won, Mode::Lost]);
        assert_eq!(Mode::PurchasePending.to_string(), "purchase_pending");
    }

    #[test]
    fn purchase_costs() {
        assert_eq!(Purchase::Letter('C').cost(), Some(80));
        assert_eq!(Purchase::Letter('c').cost(), None);
        assert_eq!(Purchase::Hint.cost(), Some(150));
        assert_eq!(Purchase::ExtraGuess.cost(), Some(150));
    }
}
