use std::time::Duration;

pub const DEFAULT_TILE_COUNT: u32 = 20;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
pub const MIN_TILE_COUNT: u32 = 5;
pub const MAX_TILE_COUNT: u32 = 100;

/// Fixed for the lifetime of a game. Only `new` and `Default` build one, so the grid is
/// always large enough for the starting snake.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakeSessionSettings {
    tile_count: u32,
    tick_interval: Duration,
}

impl SnakeSessionSettings {
    pub fn new(tile_count: u32, tick_interval: Duration) -> Result<Self, String> {
        if !(MIN_TILE_COUNT..=MAX_TILE_COUNT).contains(&tile_count) {
            return Err(format!(
                "Grid must be between {} and {} tiles wide, got {}",
                MIN_TILE_COUNT, MAX_TILE_COUNT, tile_count
            ));
        }
        if tick_interval.is_zero() {
            return Err("Tick interval must be positive".to_string());
        }
        Ok(Self {
            tile_count,
            tick_interval,
        })
    }

    pub fn tile_count(&self) -> u32 {
        self.tile_count
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Default for SnakeSessionSettings {
    fn default() -> Self {
        Self {
            tile_count: DEFAULT_TILE_COUNT,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}
