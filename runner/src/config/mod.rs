mod grid_config;
mod high_score_config;
mod runner_config;

pub use grid_config::GridConfig;
pub use high_score_config::HighScoreConfig;
pub use runner_config::{RunnerConfig, get_config_manager};
