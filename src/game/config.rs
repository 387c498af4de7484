use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

/// When is the player out of money?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LossThreshold {
    /// Broke when the bankroll can't cover the cheapest letter still for sale.
    CheapestLetter,
    /// Broke when the bankroll is below a fixed amount.
    Flat(u32),
}

/// What happens to the bankroll when a new round starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundBankroll {
    /// Every round starts with `starting_bankroll`.
    Reset,
    /// Whatever was left at the end of the last round is kept.
    CarryOver,
}

/// Economy settings chosen by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EconomyConfig {
    pub starting_bankroll: u32,
    pub starting_guesses: u32,
    pub loss_threshold: LossThreshold,
    pub round_bankroll: RoundBankroll,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        EconomyConfig {
            starting_bankroll: 1000,
            starting_guesses: 2,
            loss_threshold: LossThreshold::CheapestLetter,
            round_bankroll: RoundBankroll::Reset,
        }
    }
}

/// Failure modes when loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file")]
    Parse(#[from] serde_json::Error),
}

impl EconomyConfig {
    /// Load from a JSON file. Missing fields take their default values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        EconomyConfig::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{EconomyConfig, LossThreshold, RoundBankroll};
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = EconomyConfig::default();
        assert_eq!(config.starting_bankroll, 1000);
        assert_eq!(config.starting_guesses, 2);
        assert_eq!(config.loss_threshold, LossThreshold::CheapestLetter);
        assert_eq!(config.round_bankroll, RoundBankroll::Reset);
    }

    #[test]
    fn partial_json() {
        let config = EconomyConfig::from_json(r#"{"starting-guesses": 5}"#).unwrap();
        assert_eq!(config.starting_guesses, 5);
        assert_eq!(config.starting_bankroll, 1000);

        let config = EconomyConfig::from_json(
            r#"{"loss-threshold": {"flat": 1}, "round-bankroll": "carry-over"}"#,
        )
        .unwrap();
        assert_eq!(config.loss_threshold, LossThreshold::Flat(1));
        assert_eq!(config.round_bankroll, RoundBankroll::CarryOver);
    }

    #[test]
    fn rejects_negative_bankroll() {
        assert!(EconomyConfig::from_json(r#"{"starting-bankroll": -5}"#).is_err());
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"starting-bankroll": 250}}"#).unwrap();
        let config = EconomyConfig::from_file(file.path()).unwrap();
        assert_eq!(config.starting_bankroll, 250);

        assert!(EconomyConfig::from_file("/definitely/not/here.json").is_err());
    }
}
