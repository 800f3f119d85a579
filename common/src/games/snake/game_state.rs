use crate::games::SessionRng;
use crate::storage::HighScoreStore;
use crate::{log, log_debug, log_warn};

use super::entity::Snake;
use super::settings::SnakeSessionSettings;
use super::snapshot::{GameOverReport, GameSnapshot};
use super::types::{Cell, Direction, DirectionError, EndReason, GameStatus};

pub const FOOD_SCORE: u32 = 10;

const MAX_FOOD_SAMPLES: usize = 100;

#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// The game was not running; nothing changed.
    Skipped,
    Moved,
    Ate { score: u32 },
    GameOver(GameOverReport),
}

/// One single-player game on a square board. All mutation goes through `&mut self`,
/// so whoever drives the ticks decides how access is serialised.
pub struct SnakeGameState {
    snake: Snake,
    food: Option<Cell>,
    score: u32,
    high_score: u32,
    status: GameStatus,
    tick: u64,
    end_reason: Option<EndReason>,
    tile_count: i32,
    rng: SessionRng,
    high_score_store: Box<dyn HighScoreStore>,
}

impl SnakeGameState {
    pub fn new(
        settings: &SnakeSessionSettings,
        rng: SessionRng,
        high_score_store: Box<dyn HighScoreStore>,
    ) -> Self {
        let tile_count = settings.tile_count() as i32;
        let high_score = high_score_store.load_high_score();

        let mut state = Self {
            snake: Snake::centered(tile_count),
            food: None,
            score: 0,
            high_score,
            status: GameStatus::Idle,
            tick: 0,
            end_reason: None,
            tile_count,
            rng,
            high_score_store,
        };
        state.init(GameStatus::Idle);
        state
    }

    /// Fresh snake, score and food. `status` is normally Idle or Running.
    pub fn init(&mut self, status: GameStatus) {
        self.snake = Snake::centered(self.tile_count);
        self.score = 0;
        self.tick = 0;
        self.end_reason = None;
        self.status = status;
        self.food = self.spawn_food();
        log_debug!(
            "Game initialised ({:?}), food at {:?}, high score {}",
            status,
            self.food,
            self.high_score
        );
    }

    /// Returns true if the game is now running and was not before.
    pub fn start(&mut self) -> bool {
        match self.status {
            GameStatus::Running => false,
            GameStatus::Idle | GameStatus::Paused => {
                self.status = GameStatus::Running;
                log!("Game started");
                true
            }
            GameStatus::Over => {
                self.init(GameStatus::Running);
                log!("New game started");
                true
            }
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        self.status = GameStatus::Paused;
        log!("Game paused at tick {}", self.tick);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Running;
        log!("Game resumed at tick {}", self.tick);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(),
            GameStatus::Idle | GameStatus::Over => false,
        }
    }

    pub fn restart(&mut self) {
        log!("Game restarted");
        self.init(GameStatus::Idle);
    }

    /// Queues a turn for the next tick. Reversals into the neck are refused.
    pub fn set_direction(&mut self, requested: Direction) -> Result<(), DirectionError> {
        if self.status != GameStatus::Running {
            return Err(DirectionError::NotRunning(self.status));
        }

        let current = self.snake.direction;
        if requested.is_opposite(&current) {
            return Err(DirectionError::Reversal { current, requested });
        }

        self.snake.pending_direction = Some(requested);
        Ok(())
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Skipped;
        }

        self.tick += 1;
        self.snake.commit_direction();
        let new_head = self.snake.advance_head();

        let ate_food = self.food == Some(new_head);
        if ate_food {
            self.score += FOOD_SCORE;
            log!("Ate food at {}. Score: {}", new_head, self.score);
            self.record_high_score();
            self.food = self.spawn_food();
        } else {
            self.snake.drop_tail();
        }

        if !new_head.is_within(self.tile_count) {
            return self.finish(EndReason::WallCollision);
        }
        if self.snake.body_hits_head() {
            return self.finish(EndReason::SelfCollision);
        }
        if self.food.is_none() {
            return self.finish(EndReason::BoardFilled);
        }

        if ate_food {
            TickOutcome::Ate { score: self.score }
        } else {
            TickOutcome::Moved
        }
    }

    fn finish(&mut self, reason: EndReason) -> TickOutcome {
        self.status = GameStatus::Over;
        self.end_reason = Some(reason);
        log!(
            "Game over at tick {}: snake {} at {}. Final score: {}",
            self.tick,
            reason,
            self.snake.head(),
            self.score
        );
        TickOutcome::GameOver(self.build_report(reason))
    }

    // Persisted before the tick returns; a failing store only costs durability.
    fn record_high_score(&mut self) {
        if self.score <= self.high_score {
            return;
        }
        self.high_score = self.score;
        log!("New high score: {}", self.high_score);
        if let Err(e) = self.high_score_store.save_high_score(self.high_score) {
            log_warn!("Failed to persist high score {}: {}", self.high_score, e);
        }
    }

    /// Rejection sampling first; a near-full board falls back to scanning for a free cell.
    fn spawn_food(&mut self) -> Option<Cell> {
        for _ in 0..MAX_FOOD_SAMPLES {
            let cell = self.rng.random_cell(self.tile_count);
            if !self.snake.occupies(cell) {
                log_debug!("Food spawned at {}", cell);
                return Some(cell);
            }
        }

        let free = (0..self.tile_count)
            .flat_map(|y| (0..self.tile_count).map(move |x| Cell::new(x, y)))
            .find(|cell| !self.snake.occupies(*cell));
        match free {
            Some(cell) => log_debug!("Food placed by scan at {}", cell),
            None => log_debug!("No free cell left for food"),
        }
        free
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.body.iter().copied().collect(),
            food: self.food,
            direction: self.snake.heading(),
            score: self.score,
            high_score: self.high_score,
            status: self.status,
            tick: self.tick,
            tile_count: self.tile_count as u32,
        }
    }

    pub fn game_over_report(&self) -> Option<GameOverReport> {
        if self.status != GameStatus::Over {
            return None;
        }
        self.end_reason.map(|reason| self.build_report(reason))
    }

    fn build_report(&self, reason: EndReason) -> GameOverReport {
        GameOverReport {
            snake: self.snake.body.iter().copied().collect(),
            score: self.score,
            high_score: self.high_score,
            reason,
            tick: self.tick,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn tile_count(&self) -> u32 {
        self.tile_count as u32
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Option<Cell>) {
        self.food = food;
    }
}
