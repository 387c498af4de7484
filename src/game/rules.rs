//! Derived facts about a round. Every command goes through these rather than
//! recomputing locks, wins or losses on its own.

use log::info;

use super::{
    config::{EconomyConfig, LossThreshold},
    costs::LETTER_COSTS,
    state::{GameState, Mode},
};

/// Lock `letter` if every occurrence of it is revealed, unlock it otherwise.
/// Letters absent from the phrase are never locked.
pub fn recompute_locks(state: &mut GameState, letter: char) {
    let mut positions = state.phrase.positions_of(letter).peekable();
    let locked =
        positions.peek().is_some() && positions.all(|pos| state.revealed.contains_key(&pos));
    if locked {
        state.locked_letters.insert(letter);
    } else {
        state.locked_letters.remove(&letter);
    }
}

/// Recompute the lock for every letter in the phrase.
pub fn recompute_all_locks(state: &mut GameState) {
    state.locked_letters.clear();
    for letter in state.phrase.distinct_letters() {
        recompute_locks(state, letter);
    }
}

/// Is every non-space position revealed?
pub fn is_won(state: &GameState) -> bool {
    state
        .phrase
        .letter_positions()
        .all(|pos| state.revealed.contains_key(&pos))
}

/// Non-space positions not yet revealed, ascending. Guess-mode input may only
/// target these.
pub fn editable_positions(state: &GameState) -> Vec<usize> {
    state
        .phrase
        .letter_positions()
        .filter(|pos| !state.revealed.contains_key(pos))
        .collect()
}

/// Cheapest letter that can still be selected for purchase.
pub fn cheapest_available_letter(state: &GameState) -> Option<(char, u32)> {
    LETTER_COSTS
        .iter()
        .filter(|(letter, _)| !state.is_letter_blocked(*letter))
        .min_by_key(|(_, cost)| *cost)
        .copied()
}

/// Out of guesses and unable to afford anything useful.
pub fn loss_condition(state: &GameState, config: &EconomyConfig) -> bool {
    if state.guesses_remaining > 0 {
        return false;
    }
    match config.loss_threshold {
        LossThreshold::CheapestLetter => match cheapest_available_letter(state) {
            Some((_, cost)) => state.bankroll < cost,
            None => true,
        },
        LossThreshold::Flat(minimum) => state.bankroll < minimum,
    }
}

/// Run the loss check, revealing the whole phrase if the round is lost.
/// Returns the positions revealed by the loss.
pub fn apply_loss_check(state: &mut GameState, config: &EconomyConfig) -> Vec<usize> {
    if state.mode == Mode::Won || !loss_condition(state, config) {
        return Vec::new();
    }

    info!(
        "Round lost: no guesses remaining and bankroll {} is insufficient",
        state.bankroll
    );
    let positions = state.phrase.letter_positions().collect::<Vec<usize>>();
    let newly_revealed = positions
        .into_iter()
        .filter(|pos| state.reveal(*pos))
        .collect();
    state.mode = Mode::Lost;
    state.guesses_remaining = 0;
    state.pending_purchase = None;
    state.pending_guess.clear();
    recompute_all_locks(state);
    newly_revealed
}
