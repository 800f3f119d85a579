mod entity;
mod game_state;
mod session;
mod settings;
mod snapshot;
mod types;

pub use entity::{INITIAL_LENGTH, Snake};
pub use game_state::{FOOD_SCORE, SnakeGameState, TickOutcome};
pub use session::{SessionCommand, SnakeSession, SnakeSessionState};
pub use settings::{
    DEFAULT_TICK_INTERVAL_MS, DEFAULT_TILE_COUNT, MAX_TILE_COUNT, MIN_TILE_COUNT,
    SnakeSessionSettings,
};
pub use snapshot::{GameOverReport, GameSnapshot};
pub use types::{Cell, Direction, DirectionError, EndReason, GameStatus};
