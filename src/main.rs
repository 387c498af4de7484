use anyhow::Context;
use bankword::{
    driver::{console::ConsoleDriver, direct::DirectDriver, Driver, DriverError},
    game::EconomyConfig,
    persistence::{JsonFileSink, MemorySink, PersistenceSink},
    puzzle::BuiltinPuzzles,
};
use log::{error, info};
use std::{env, io};

/// Path to a JSON economy config.
const CONFIG_VAR: &str = "BANKWORD_CONFIG";
/// Where to keep the round between runs.
const SAVE_VAR: &str = "BANKWORD_SAVE";

fn main() -> anyhow::Result<()> {
    env_logger::try_init().unwrap_or(());

    let config = match env::var_os(CONFIG_VAR) {
        Some(path) => EconomyConfig::from_file(&path)
            .with_context(|| format!("failed to load economy config from {:?}", path))?,
        None => EconomyConfig::default(),
    };
    let sink: Box<dyn PersistenceSink> = match env::var_os(SAVE_VAR) {
        Some(path) => Box::new(JsonFileSink::new(path)),
        None => Box::new(MemorySink::new()),
    };
    let provider = Box::new(BuiltinPuzzles::new());

    let mut args = env::args().skip(1);
    if args.next().as_deref() == Some("bot") {
        let rounds = match args.next() {
            Some(n) => n
                .parse::<usize>()
                .with_context(|| format!("invalid round count {:?}", n))?,
            None => 1,
        };
        let mut driver =
            DirectDriver::new(config, provider, sink).context("failed to start a round")?;
        for _ in 0..rounds {
            match driver.play() {
                Ok(summary) => println!(
                    "{} {} ({}) with {} left",
                    summary.mode, summary.phrase, summary.category, summary.bankroll
                ),
                Err(DriverError::Stalled(steps)) => {
                    // Try the next puzzle
                    info!("Solver stalled after {} steps, playing again...", steps);
                    driver.skip_round().context("failed to start a round")?;
                }
                Err(e) => {
                    error!("An error occurred: {:?}", e);
                    return Err(e).context("bot could not play");
                }
            }
        }
    } else {
        let stdin = io::stdin();
        let mut driver = ConsoleDriver::new(config, provider, sink, stdin.lock(), io::stdout())
            .context("failed to start a round")?;
        driver.play().context("console session failed")?;
    }

    Ok(())
}
