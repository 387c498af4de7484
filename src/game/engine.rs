//! The state machine itself. Each command either applies in full and returns
//! the positions it newly revealed, or is rejected and leaves the state as it was.

use log::{debug, info};
use rand::Rng;

use super::{
    command::{Command, Rejection},
    config::{EconomyConfig, RoundBankroll},
    costs::{is_playable_letter, letter_cost},
    phrase::Phrase,
    rules::{
        apply_loss_check, editable_positions, is_won, loss_condition, recompute_all_locks,
        recompute_locks,
    },
    state::{GameState, Mode, Purchase},
};

/// Positions revealed by a command for the first time, or the reason it was refused.
pub type CommandResult = Result<Vec<usize>, Rejection>;

/// Apply `command` to a copy of `state` and return the copy. Rejected commands
/// return an identical state.
pub fn reduce(
    state: &GameState,
    command: &Command,
    config: &EconomyConfig,
    rng: &mut impl Rng,
) -> GameState {
    let mut next = state.clone();
    if next.apply(command, config, rng).is_err() {
        debug_assert_eq!(&next, state);
    }
    next
}

impl GameState {
    /// Dispatch a command in place.
    pub fn apply(
        &mut self,
        command: &Command,
        config: &EconomyConfig,
        rng: &mut impl Rng,
    ) -> CommandResult {
        let result = match command {
            Command::SelectLetter(letter) => self.select_letter(*letter),
            Command::SelectHint => self.select_hint(),
            Command::SelectExtraGuess => self.select_extra_guess(),
            Command::ConfirmPurchase => self.confirm_purchase(config, rng),
            Command::EnterGuessMode => self.enter_guess_mode(config),
            Command::ExitGuessMode => self.exit_guess_mode(),
            Command::InputGuessLetter(letter) => self.input_guess_letter(*letter),
            Command::DeleteGuessLetter => self.delete_guess_letter(),
            Command::SubmitGuess => self.submit_guess(config),
            Command::StartNewRound { phrase, category } => {
                self.start_new_round(phrase.clone(), category, config);
                Ok(Vec::new())
            }
        };
        match &result {
            Ok(revealed) => debug!("Applied {:?}, revealed {:?}", command, revealed),
            Err(rejection) => debug!("Rejected {:?}: {}", command, rejection),
        }
        result
    }

    /// Select a letter for purchase, or deselect it if it's already selected.
    pub fn select_letter(&mut self, letter: char) -> CommandResult {
        self.ensure_mode(&[Mode::Idle, Mode::PurchasePending])?;

        if self.pending_purchase == Some(Purchase::Letter(letter)) {
            self.clear_selection();
            return Ok(Vec::new());
        }

        let cost = letter_cost(letter).ok_or(Rejection::InvalidLetter(letter))?;
        if self.locked_letters.contains(&letter) {
            return Err(Rejection::LetterLocked(letter));
        }
        if self.incorrect_purchases.contains(&letter) {
            return Err(Rejection::LetterIncorrect(letter));
        }
        self.ensure_affordable(cost)?;

        self.select(Purchase::Letter(letter));
        Ok(Vec::new())
    }

    /// Toggle a hint purchase. Affordability is checked on confirmation.
    pub fn select_hint(&mut self) -> CommandResult {
        self.toggle_selection(Purchase::Hint)
    }

    /// Toggle an extra guess purchase. Affordability is checked on confirmation.
    pub fn select_extra_guess(&mut self) -> CommandResult {
        self.toggle_selection(Purchase::ExtraGuess)
    }

    /// Pay for and apply the pending purchase.
    ///
    /// If the bankroll no longer covers it, the selection is dropped without
    /// charge and the loss check runs.
    pub fn confirm_purchase(
        &mut self,
        config: &EconomyConfig,
        rng: &mut impl Rng,
    ) -> CommandResult {
        self.ensure_mode(&[Mode::PurchasePending])?;
        let purchase = self.pending_purchase.ok_or(Rejection::NothingPending)?;
        let cost = match (purchase, purchase.cost()) {
            (_, Some(cost)) => cost,
            (Purchase::Letter(letter), None) => return Err(Rejection::InvalidLetter(letter)),
            (_, None) => return Err(Rejection::NothingPending),
        };

        if self.bankroll < cost {
            info!(
                "Cannot afford {:?} (costs {}, bankroll {}), clearing selection",
                purchase, cost, self.bankroll
            );
            self.clear_selection();
            return Ok(apply_loss_check(self, config));
        }
        if purchase == Purchase::Hint && editable_positions(self).is_empty() {
            debug!("No hidden positions left to hint, clearing selection");
            self.clear_selection();
            return Ok(Vec::new());
        }

        self.bankroll -= cost;
        self.clear_selection();
        let mut revealed = match purchase {
            Purchase::Letter(letter) => self.reveal_letter(letter),
            Purchase::Hint => self.reveal_random(rng),
            Purchase::ExtraGuess => {
                self.guesses_remaining = self.guesses_remaining.saturating_add(1);
                Vec::new()
            }
        };

        if is_won(self) {
            info!("Round won after buying {:?}", purchase);
            self.mode = Mode::Won;
        } else {
            revealed.extend(apply_loss_check(self, config));
        }
        Ok(revealed)
    }

    /// Start typing a full guess. Any pending purchase is dropped.
    ///
    /// With no guesses left this is refused, unless the player is also broke,
    /// in which case the round is lost.
    pub fn enter_guess_mode(&mut self, config: &EconomyConfig) -> CommandResult {
        self.ensure_mode(&[Mode::Idle, Mode::PurchasePending])?;
        if self.guesses_remaining == 0 {
            if loss_condition(self, config) {
                return Ok(apply_loss_check(self, config));
            }
            return Err(Rejection::NoGuessesRemaining);
        }
        if editable_positions(self).is_empty() {
            return Err(Rejection::NoEditablePositions);
        }

        self.pending_purchase = None;
        self.pending_guess.clear();
        self.mode = Mode::GuessMode;
        Ok(Vec::new())
    }

    /// Leave guess mode, discarding the tentative guess. No guess is used up.
    pub fn exit_guess_mode(&mut self) -> CommandResult {
        self.ensure_mode(&[Mode::GuessMode])?;
        self.pending_guess.clear();
        self.mode = Mode::Idle;
        Ok(Vec::new())
    }

    /// Type a letter into the first empty editable slot. Once every slot is
    /// filled, further letters overwrite the last slot.
    pub fn input_guess_letter(&mut self, letter: char) -> CommandResult {
        self.ensure_mode(&[Mode::GuessMode])?;
        if !is_playable_letter(letter) {
            return Err(Rejection::InvalidLetter(letter));
        }
        if self.locked_letters.contains(&letter) {
            return Err(Rejection::LetterLocked(letter));
        }

        let editable = editable_positions(self);
        let target = editable
            .iter()
            .find(|pos| !self.pending_guess.contains_key(*pos))
            .or_else(|| editable.last())
            .copied()
            .ok_or(Rejection::NoEditablePositions)?;
        self.pending_guess.insert(target, letter);
        Ok(Vec::new())
    }

    /// Remove the last typed letter.
    pub fn delete_guess_letter(&mut self) -> CommandResult {
        self.ensure_mode(&[Mode::GuessMode])?;
        let target = editable_positions(self)
            .into_iter()
            .rev()
            .find(|pos| self.pending_guess.contains_key(pos))
            .ok_or(Rejection::NothingToDelete)?;
        self.pending_guess.remove(&target);
        Ok(Vec::new())
    }

    /// Score the tentative guess. Every editable slot must be filled.
    ///
    /// One guess is used up. Correct letters are revealed and the rest dropped.
    pub fn submit_guess(&mut self, config: &EconomyConfig) -> CommandResult {
        self.ensure_mode(&[Mode::GuessMode])?;
        let editable = editable_positions(self);
        let missing = editable
            .iter()
            .filter(|pos| !self.pending_guess.contains_key(*pos))
            .count();
        if missing > 0 {
            return Err(Rejection::IncompleteGuess { missing });
        }
        if self.guesses_remaining == 0 {
            return Err(Rejection::NoGuessesRemaining);
        }

        self.guesses_remaining -= 1;
        let guess = std::mem::take(&mut self.pending_guess);
        let mut revealed = Vec::new();
        for pos in editable {
            if guess.get(&pos).copied() == self.phrase.get(pos) && self.reveal(pos) {
                revealed.push(pos);
            }
        }
        recompute_all_locks(self);

        if is_won(self) {
            info!("Round won by guess");
            self.mode = Mode::Won;
        } else {
            debug!(
                "Guess was {} letters short, {} guesses remaining",
                editable_positions(self).len(),
                self.guesses_remaining
            );
            self.mode = Mode::Idle;
            revealed.extend(apply_loss_check(self, config));
        }
        Ok(revealed)
    }

    /// Throw away the current round and start a fresh one on `phrase`. Accepted
    /// from every mode.
    pub fn start_new_round(&mut self, phrase: Phrase, category: &str, config: &EconomyConfig) {
        let bankroll = match config.round_bankroll {
            RoundBankroll::Reset => config.starting_bankroll,
            RoundBankroll::CarryOver => self.bankroll,
        };
        info!("Starting new round ({}), bankroll {}", category, bankroll);
        *self = GameState::new(phrase, category, config);
        self.bankroll = bankroll;
    }

    fn ensure_mode(&self, allowed: &[Mode]) -> Result<(), Rejection> {
        if allowed.contains(&self.mode) {
            Ok(())
        } else {
            Err(Rejection::WrongMode(self.mode))
        }
    }

    fn ensure_affordable(&self, cost: u32) -> Result<(), Rejection> {
        if self.bankroll < cost {
            return Err(Rejection::InsufficientFunds {
                cost,
                bankroll: self.bankroll,
            });
        }
        Ok(())
    }

    fn select(&mut self, purchase: Purchase) {
        self.pending_purchase = Some(purchase);
        self.mode = Mode::PurchasePending;
    }

    fn clear_selection(&mut self) {
        self.pending_purchase = None;
        self.mode = Mode::Idle;
    }

    fn toggle_selection(&mut self, purchase: Purchase) -> CommandResult {
        self.ensure_mode(&[Mode::Idle, Mode::PurchasePending])?;
        if self.pending_purchase == Some(purchase) {
            self.clear_selection();
        } else {
            self.select(purchase);
        }
        Ok(Vec::new())
    }

    /// Reveal every occurrence of `letter`, or record it as a wrong purchase.
    fn reveal_letter(&mut self, letter: char) -> Vec<usize> {
        let positions = self.phrase.positions_of(letter).collect::<Vec<usize>>();
        if positions.is_empty() {
            info!("Letter {} is not in the phrase", letter);
            self.incorrect_purchases.insert(letter);
            return Vec::new();
        }
        let revealed = positions
            .into_iter()
            .filter(|pos| self.reveal(*pos))
            .collect();
        recompute_locks(self, letter);
        revealed
    }

    /// Reveal one hidden position chosen uniformly at random.
    fn reveal_random(&mut self, rng: &mut impl Rng) -> Vec<usize> {
        let hidden = editable_positions(self);
        if hidden.is_empty() {
            return Vec::new();
        }
        let pos = hidden[rng.gen_range(0..hidden.len())];
        let Some(letter) = self.phrase.get(pos) else {
            return Vec::new();
        };
        let newly = self.reveal(pos);
        recompute_locks(self, letter);
        debug!("Hint revealed {} at {}", letter, pos);
        if newly {
            vec![pos]
        } else {
            Vec::new()
        }
    }
}
