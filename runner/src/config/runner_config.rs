use serde::{Deserialize, Serialize};
use snake_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use snake_common::games::snake::{DEFAULT_TICK_INTERVAL_MS, SnakeSessionSettings};
use snake_common::logger::LogLevel;
use std::time::Duration;

use super::{GridConfig, HighScoreConfig};

const CONFIG_FILE_NAME: &str = "snake_config.yaml";
const MIN_TICK_INTERVAL_MS: u64 = 20;
const MAX_TICK_INTERVAL_MS: u64 = 5000;

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager()
-> ConfigManager<FileContentConfigProvider, RunnerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(get_config_path())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct RunnerConfig {
    pub grid: GridConfig,
    pub tick_interval_ms: u64,
    pub high_score: HighScoreConfig,
    #[serde(default)]
    pub log_level: LogLevel,
}

impl RunnerConfig {
    pub fn session_settings(&self) -> Result<SnakeSessionSettings, String> {
        SnakeSessionSettings::new(
            self.grid.tile_count(),
            Duration::from_millis(self.tick_interval_ms),
        )
    }
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        self.grid.validate()?;
        self.high_score.validate()?;
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            return Err(format!(
                "tick_interval_ms must be between {} and {}, got {}",
                MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS, self.tick_interval_ms
            ));
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            high_score: HighScoreConfig::default(),
            log_level: LogLevel::Info,
        }
    }
}
