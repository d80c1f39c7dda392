use std::collections::HashSet;

use rand::Rng;

use crate::coordinates::{Coordinates, Grid};
use crate::numbers;

const MAX_RANDOM_ATTEMPTS: usize = 64;

/// Chooses food cells uniformly among the cells the snake does not cover.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPositionPicker;

impl RandomPositionPicker {
    /// Returns `None` when every cell of the grid is occupied.
    pub fn pick<R: Rng>(
        &self,
        rng: &mut R,
        grid: &Grid,
        occupied: &HashSet<Coordinates>,
    ) -> Option<Coordinates> {
        let total = grid.cell_count();
        let taken = occupied.iter().filter(|cell| grid.contains(**cell)).count();
        if taken >= total {
            return None;
        }

        // if the snake covers more than 80% of the board pick straight from the
        // free cells, otherwise draw random cells until one is free
        if taken <= (total * 4) / 5 {
            for _ in 0..MAX_RANDOM_ATTEMPTS {
                let column = numbers::rand(rng, grid.columns(), 0)?;
                let row = numbers::rand(rng, grid.rows(), 0)?;
                let candidate = grid.cell_center(column, row);
                if !occupied.contains(&candidate) {
                    return Some(candidate);
                }
            }
            debug!(
                "no free cell after {} draws, falling back to enumeration",
                MAX_RANDOM_ATTEMPTS
            );
        }

        let free: Vec<Coordinates> = grid
            .cells()
            .filter(|cell| !occupied.contains(cell))
            .collect();
        let index = numbers::rand(rng, free.len() as i32, 0)?;
        Some(free[index as usize])
    }
}
