use rand::Rng;

use crate::geometry::{Cell, GridSize};
use crate::snake::Snake;

/// Random draws attempted before falling back to scanning free cells.
pub const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Picks a uniformly random cell of `bounds` that the snake does not occupy.
///
/// Draws from the whole board and rejects occupied cells. A crowded board
/// can make rejection sampling arbitrarily slow, so after
/// [`FOOD_SAMPLE_ATTEMPTS`] misses the free cells are enumerated and one is
/// chosen directly. Both paths are uniform over free cells.
///
/// Returns `None` only when the snake covers the whole board.
#[must_use]
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Cell> {
    if bounds.total_cells() == 0 {
        return None;
    }

    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let candidate = Cell::new(
            rng.gen_range(0..i32::from(bounds.width)),
            rng.gen_range(0..i32::from(bounds.height)),
        );
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    scan_free_cell(rng, bounds, snake)
}

fn scan_free_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Cell> {
    let candidates: Vec<Cell> = bounds.cells().filter(|cell| !snake.occupies(*cell)).collect();

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
