use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// High-score persistence failures.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("score file {path} is malformed: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persists the single high-score value across sessions.
pub trait HighScoreStore {
    /// Reads the stored high score; an absent record reads as zero.
    fn load(&mut self) -> Result<u32, ScoreError>;

    fn save(&mut self, score: u32) -> Result<(), ScoreError>;
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Box<T> {
    fn load(&mut self) -> Result<u32, ScoreError> {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<(), ScoreError> {
        (**self).save(score)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// JSON file store, `{ "high_score": N }`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform data directory.
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<u32, ScoreError> {
        load_high_score_from_path(&self.path)
    }

    fn save(&mut self, score: u32) -> Result<(), ScoreError> {
        save_high_score_to_path(&self.path, score)
    }
}

/// Volatile store used by tests and `--no-save` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    high_score: u32,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            saves: 0,
        }
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Number of successful `save` calls.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u32, ScoreError> {
        Ok(self.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), ScoreError> {
        self.high_score = score;
        self.saves += 1;
        Ok(())
    }
}

fn load_high_score_from_path(path: &Path) -> Result<u32, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(source) => {
            return Err(ScoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.high_score)
        .map_err(|source| ScoreError::Format {
            path: path.to_path_buf(),
            source,
        })
}

fn save_high_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    let io_error = |source: io::Error| ScoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload).map_err(|source| ScoreError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{HighScoreStore, JsonFileStore, MemoryStore, ScoreError};

    #[test]
    fn saved_score_loads_back() {
        let path = unique_test_path("round_trip");
        let mut store = JsonFileStore::new(path.clone());

        store.save(42).expect("score save should succeed");
        let loaded = store.load().expect("load should succeed");

        assert_eq!(loaded, 42);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_returns_zero() {
        let path = unique_test_path("missing");
        // Deliberately do not create the file.
        let loaded = JsonFileStore::new(path)
            .load()
            .expect("missing file should return Ok(0)");
        assert_eq!(loaded, 0);
    }

    #[test]
    fn malformed_score_file_returns_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(matches!(
            JsonFileStore::new(path.clone()).load(),
            Err(ScoreError::Format { .. })
        ));

        cleanup_test_path(&path);
    }

    #[test]
    fn memory_store_counts_saves() {
        let mut store = MemoryStore::with_high_score(30);
        assert_eq!(store.load().expect("memory load"), 30);

        store.save(40).expect("memory save");
        assert_eq!(store.high_score(), 40);
        assert_eq!(store.saves(), 1);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
