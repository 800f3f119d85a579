use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::snake::Cell;

/// Seedable RNG owned by one game, so a seed reproduces every food placement.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform over the whole `tile_count` x `tile_count` board.
    pub fn random_cell(&mut self, tile_count: i32) -> Cell {
        Cell::new(
            self.rng.random_range(0..tile_count),
            self.rng.random_range(0..tile_count),
        )
    }
}
