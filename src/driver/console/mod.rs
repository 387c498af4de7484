use log::debug;
use std::io::{BufRead, Write};

use super::{next_round, open_round, Driver, DriverError, RoundSummary};
use crate::{
    game::{Command, EconomyConfig, Game},
    persistence::PersistenceSink,
    puzzle::PuzzleProvider,
};

mod render;

pub use render::render_board;

const HELP: &str =
    "commands: buy X, hint, extra, confirm, guess, exit, type X, delete, submit, new, quit";

/// A driver for a person at a terminal. Reads one command per line and prints
/// the board after each.
pub struct ConsoleDriver<R, W> {
    game: Game,
    provider: Box<dyn PuzzleProvider>,
    sink: Box<dyn PersistenceSink>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleDriver<R, W> {
    pub fn new(
        config: EconomyConfig,
        mut provider: Box<dyn PuzzleProvider>,
        mut sink: Box<dyn PersistenceSink>,
        input: R,
        output: W,
    ) -> Result<Self, DriverError> {
        let game = open_round(config, provider.as_mut(), sink.as_mut(), None)?;
        Ok(ConsoleDriver {
            game,
            provider,
            sink,
            input,
            output,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn show_board(&mut self) -> Result<(), DriverError> {
        writeln!(self.output, "{}", render_board(&self.game.state))?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Driver for ConsoleDriver<R, W> {
    /// Play until `quit` or end of input. Finished rounds stay on screen until
    /// the player asks for a `new` one.
    fn play(&mut self) -> Result<RoundSummary, DriverError> {
        writeln!(self.output, "{}", HELP)?;
        self.show_board()?;

        let mut steps = 0;
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let text = line.trim();
            match text.to_lowercase().as_str() {
                "" => continue,
                "quit" => break,
                "new" => {
                    next_round(&mut self.game, self.provider.as_mut(), self.sink.as_mut())?;
                    steps += 1;
                }
                _ => match text.parse::<Command>() {
                    Ok(command) => match self.game.dispatch(&command) {
                        Ok(revealed) => {
                            debug!("Player's {:?} revealed {:?}", command, revealed);
                            self.sink.save(&self.game.state)?;
                            steps += 1;
                            if !revealed.is_empty() {
                                writeln!(self.output, "revealed {} letter(s)", revealed.len())?;
                            }
                        }
                        Err(rejection) => {
                            writeln!(self.output, "can't do that: {}", rejection)?;
                            continue;
                        }
                    },
                    Err(e) => {
                        writeln!(self.output, "{}\n{}", e, HELP)?;
                        continue;
                    }
                },
            }
            self.show_board()?;
        }

        self.output.flush()?;
        Ok(RoundSummary::new(&self.game.state, steps))
    }
}
