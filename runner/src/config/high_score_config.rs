use serde::{Deserialize, Serialize};
use snake_common::config::Validate;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct HighScoreConfig {
    /// YAML file holding the persisted key-value entries.
    pub location: String,
}

impl Validate for HighScoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.location.trim().is_empty() {
            return Err("high score location must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for HighScoreConfig {
    fn default() -> Self {
        Self {
            location: "snake_high_score.yaml".to_string(),
        }
    }
}
