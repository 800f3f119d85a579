use crate::{log_debug, log_warn};

use super::{KeyValueStore, StorageError};

pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

pub trait HighScoreStore: Send {
    /// Absent or unreadable values count as 0.
    fn load_high_score(&self) -> u32;
    fn save_high_score(&self, score: u32) -> Result<(), StorageError>;
}

pub struct KeyValueHighScoreStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KeyValueHighScoreStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> HighScoreStore for KeyValueHighScoreStore<S> {
    fn load_high_score(&self) -> u32 {
        match self.store.get(HIGH_SCORE_KEY) {
            Ok(Some(value)) => value.trim().parse().unwrap_or_else(|_| {
                log_warn!("Ignoring unparsable high score {:?}", value);
                0
            }),
            Ok(None) => {
                log_debug!("No stored high score, starting from 0");
                0
            }
            Err(e) => {
                log_warn!("Failed to load high score: {}", e);
                0
            }
        }
    }

    fn save_high_score(&self, score: u32) -> Result<(), StorageError> {
        self.store.set(HIGH_SCORE_KEY, &score.to_string())
    }
}
