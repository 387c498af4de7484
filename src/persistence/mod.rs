use log::{debug, warn};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::game::{snapshot, GameState};

/// Failure modes for persistence sinks.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("snapshot i/o failed")]
    Io(#[from] io::Error),
    #[error("failed to serialize snapshot")]
    Serialize(#[from] serde_json::Error),
}

/// Somewhere the host keeps the current round between sessions.
pub trait PersistenceSink {
    /// Store a snapshot of `state`, replacing any previous one.
    fn save(&mut self, state: &GameState) -> Result<(), PersistError>;

    /// The stored round, if there is one and it passes validation. Invalid
    /// snapshots are discarded.
    fn load(&mut self) -> Result<Option<GameState>, PersistError>;

    /// Forget the stored round.
    fn clear(&mut self) -> Result<(), PersistError>;
}

/// Keeps the snapshot as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileSink {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceSink for JsonFileSink {
    fn save(&mut self, state: &GameState) -> Result<(), PersistError> {
        fs::write(&self.path, snapshot::capture(state)?)?;
        Ok(())
    }

    fn load(&mut self) -> Result<Option<GameState>, PersistError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match snapshot::restore(&raw) {
            Ok(state) => {
                debug!("Restored round from {}", self.path.display());
                Ok(Some(state))
            }
            Err(e) => {
                warn!("Discarding saved round at {}: {}", self.path.display(), e);
                self.clear()?;
                Ok(None)
            }
        }
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps the snapshot in memory. Used by tests and one-shot bot runs.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    snapshot: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Seed the sink with raw snapshot text.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        MemorySink {
            snapshot: Some(snapshot.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }
}

impl PersistenceSink for MemorySink {
    fn save(&mut self, state: &GameState) -> Result<(), PersistError> {
        self.snapshot = Some(snapshot::capture(state)?);
        Ok(())
    }

    fn load(&mut self) -> Result<Option<GameState>, PersistError> {
        let Some(raw) = &self.snapshot else {
            return Ok(None);
        };
        match snapshot::restore(raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                warn!("Discarding saved round: {}", e);
                self.snapshot = None;
                Ok(None)
            }
        }
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        self.snapshot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::tempdir;

    use super::{JsonFileSink, MemorySink, PersistenceSink};
    use crate::game::{EconomyConfig, GameState, Phrase};

    fn state() -> GameState {
        let config = EconomyConfig::default();
        let mut state = GameState::new(Phrase::new("CAT").unwrap(), "Animal", &config);
        state.select_letter('C').unwrap();
        state
    }

    #[test]
    fn file_sink_round_trip() {
        let dir = tempdir().unwrap();
        let mut sink = JsonFileSink::new(dir.path().join("round.json"));
        assert_eq!(sink.load().unwrap(), None);

        let state = state();
        sink.save(&state).unwrap();
        assert_eq!(sink.load().unwrap(), Some(state));

        sink.clear().unwrap();
        assert!(!sink.path().exists());
        assert_eq!(sink.load().unwrap(), None);
        // Clearing twice is fine
        sink.clear().unwrap();
    }

    #[test]
    fn file_sink_discards_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round.json");
        fs::write(&path, "{\"phrase\": \"CAT\"").unwrap();

        let mut sink = JsonFileSink::new(&path);
        assert_eq!(sink.load().unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn memory_sink_discards_invalid() {
        let mut sink = MemorySink::with_snapshot("not json");
        assert_eq!(sink.load().unwrap(), None);
        assert_eq!(sink.raw(), None);

        let state = state();
        sink.save(&state).unwrap();
        assert!(sink.raw().is_some());
        assert_eq!(sink.load().unwrap(), Some(state));
    }
}
