use log::debug;
use std::collections::{BTreeMap, BTreeSet};

use crate::game::{
    costs::{letter_cost, HINT_COST},
    rules::editable_positions,
    Command, GameState, Mode, Phrase,
};


/// Letters in rough order of English frequency.
pub const LETTER_FREQUENCY: [char; 26] = [
    'E', 'T', 'A', 'O', 'I', 'N', 'S', 'H', 'R', 'D', 'L', 'U', 'C', 'M', 'W', 'F', 'G', 'Y',
    'P', 'B', 'V', 'K', 'J', 'X', 'Q', 'Z',
];

/// A bot that picks the next command for a round.
///
/// Buys the most common letters it can afford, then spends its guesses, then
/// hints. Guesses never repeat a letter that already failed at the same slot.
#[derive(Debug, Default)]
pub struct Solver {
    /// Phrase of the round we're tracking, so a new round resets our notes.
    round: Option<Phrase>,
    /// Letters already guessed at each slot.
    tried: BTreeMap<usize, BTreeSet<char>>,
}

impl Solver {
    /// Pick the next command, or `None` if the round is over or there's nothing
    /// useful left to do.
    pub fn next_command(&mut self, state: &GameState) -> Option<Command> {
        if self.round.as_ref() != Some(&state.phrase) {
            self.round = Some(state.phrase.clone());
            self.tried.clear();
        }

        let command = match state.mode {
            Mode::Won | Mode::Lost => None,
            Mode::PurchasePending => Some(Command::ConfirmPurchase),
            Mode::GuessMode => self.next_guess_input(state),
            Mode::Idle => self.next_idle_command(state),
        };
        debug!("Solver chose {:?}", command);
        command
    }

    fn next_idle_command(&self, state: &GameState) -> Option<Command> {
        if let Some(letter) = best_affordable_letter(state) {
            return Some(Command::SelectLetter(letter));
        }
        if state.guesses_remaining > 0 {
            return Some(Command::EnterGuessMode);
        }
        if state.bankroll >= HINT_COST {
            return Some(Command::SelectHint);
        }
        // Out of both; entering guess mode settles the round as lost
        Some(Command::EnterGuessMode)
    }

    fn next_guess_input(&mut self, state: &GameState) -> Option<Command> {
        let Some(slot) = editable_positions(state)
            .into_iter()
            .find(|pos| !state.pending_guess.contains_key(pos))
        else {
            return Some(Command::SubmitGuess);
        };

        let tried = self.tried.entry(slot).or_default();
        let letter = LETTER_FREQUENCY.iter().copied().find(|letter| {
            !state.is_letter_blocked(*letter) && !tried.contains(letter)
        });
        match letter {
            Some(letter) => {
                tried.insert(letter);
                Some(Command::InputGuessLetter(letter))
            }
            None => Some(Command::ExitGuessMode),
        }
    }
}

/// Most common letter that's still selectable and within budget.
fn best_affordable_letter(state: &GameState) -> Option<char> {
    LETTER_FREQUENCY.iter().copied().find(|letter| {
        !state.is_letter_blocked(*letter)
            && letter_cost(*letter).map_or(false, |cost| cost <= state.bankroll)
    })
}
