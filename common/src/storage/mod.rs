mod high_score;
mod key_value_store;
mod storage_error;

pub use high_score::{HIGH_SCORE_KEY, HighScoreStore, KeyValueHighScoreStore};
pub use key_value_store::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
pub use storage_error::StorageError;
