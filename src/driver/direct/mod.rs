use log::{debug, info};

use super::{next_round, open_round, Driver, DriverError, RoundSummary};
use crate::{
    game::{EconomyConfig, Game},
    persistence::PersistenceSink,
    puzzle::PuzzleProvider,
    solver::Solver,
};

#[cfg(test)]
mod tests;

/// Give up on a round after this many commands.
pub const MAX_STEPS: usize = 1000;

/// A driver that lets the solver play against an in-process `Game`.
/// Resumes a saved round if there is one, otherwise asks the provider.
pub struct DirectDriver {
    /// The game itself.
    game: Game,
    /// The solver which will attempt to play the game.
    solver: Solver,
    provider: Box<dyn PuzzleProvider>,
    sink: Box<dyn PersistenceSink>,
}

impl DirectDriver {
    pub fn new(
        config: EconomyConfig,
        provider: Box<dyn PuzzleProvider>,
        sink: Box<dyn PersistenceSink>,
    ) -> Result<Self, DriverError> {
        Self::open(config, provider, sink, None)
    }

    /// A driver whose hints are reproducible.
    pub fn with_seed(
        config: EconomyConfig,
        provider: Box<dyn PuzzleProvider>,
        sink: Box<dyn PersistenceSink>,
        seed: u64,
    ) -> Result<Self, DriverError> {
        Self::open(config, provider, sink, Some(seed))
    }

    fn open(
        config: EconomyConfig,
        mut provider: Box<dyn PuzzleProvider>,
        mut sink: Box<dyn PersistenceSink>,
        seed: Option<u64>,
    ) -> Result<Self, DriverError> {
        let game = open_round(config, provider.as_mut(), sink.as_mut(), seed)?;
        Ok(DirectDriver {
            game,
            solver: Solver::default(),
            provider,
            sink,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Abandon the current round for the provider's next puzzle.
    pub fn skip_round(&mut self) -> Result<(), DriverError> {
        next_round(&mut self.game, self.provider.as_mut(), self.sink.as_mut())
    }
}

impl Driver for DirectDriver {
    /// Play one round to the end. If the last round is already over, a new one
    /// is started first.
    fn play(&mut self) -> Result<RoundSummary, DriverError> {
        if self.game.state.mode.is_terminal() {
            next_round(&mut self.game, self.provider.as_mut(), self.sink.as_mut())?;
        }

        let mut steps = 0;
        while !self.game.state.mode.is_terminal() {
            if steps >= MAX_STEPS {
                return Err(DriverError::Stalled(steps));
            }
            let Some(command) = self.solver.next_command(&self.game.state) else {
                return Err(DriverError::Stalled(steps));
            };
            match self.game.dispatch(&command) {
                Ok(revealed) => {
                    debug!("Revealed {:?}", revealed);
                    self.sink.save(&self.game.state)?;
                }
                Err(rejection) => {
                    info!("Solver's {:?} was rejected: {}", command, rejection);
                    return Err(DriverError::Stalled(steps));
                }
            }
            steps += 1;
        }

        info!(
            "Round {} in {} steps, bankroll {}",
            self.game.state.mode, steps, self.game.state.bankroll
        );
        Ok(RoundSummary::new(&self.game.state, steps))
    }
}
