use serde::{Deserialize, Serialize};
use snake_common::config::Validate;
use snake_common::games::snake::{MAX_TILE_COUNT, MIN_TILE_COUNT};

/// Board size in the units of the original canvas: tiles = canvas_width / cell_size.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub struct GridConfig {
    pub canvas_width: u32,
    pub cell_size: u32,
}

impl GridConfig {
    pub fn tile_count(&self) -> u32 {
        self.canvas_width / self.cell_size
    }
}

impl Validate for GridConfig {
    fn validate(&self) -> Result<(), String> {
        if self.cell_size == 0 {
            return Err("cell_size must be greater than 0".to_string());
        }
        if self.canvas_width % self.cell_size != 0 {
            return Err(format!(
                "canvas_width {} is not a multiple of cell_size {}",
                self.canvas_width, self.cell_size
            ));
        }
        let tiles = self.tile_count();
        if !(MIN_TILE_COUNT..=MAX_TILE_COUNT).contains(&tiles) {
            return Err(format!(
                "Grid must be between {} and {} tiles wide, got {}",
                MIN_TILE_COUNT, MAX_TILE_COUNT, tiles
            ));
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            cell_size: 20,
        }
    }
}
