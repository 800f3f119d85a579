use super::types::{Cell, Direction, EndReason, GameStatus};

/// Read-only copy of the game handed to renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSnapshot {
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    pub tick: u64,
    pub tile_count: u32,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameOverReport {
    pub snake: Vec<Cell>,
    pub score: u32,
    pub high_score: u32,
    pub reason: EndReason,
    pub tick: u64,
}
