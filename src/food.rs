//! Food placement.

use rand::Rng;

use crate::{
    config::MAX_SPAWN_ATTEMPTS,
    grid::{Cell, Grid},
    snake::Occupancy,
};

/// Picks a free cell uniformly at random.
///
/// After [`MAX_SPAWN_ATTEMPTS`] rejected draws the free cells are counted and
/// one of them is drawn by index, so a nearly full board still terminates and
/// stays uniform. Returns `None` only when every cell is occupied.
pub fn spawn<R, O>(rng: &mut R, grid: &Grid, occupied: &O) -> Option<Cell>
where
    R: Rng,
    O: Occupancy + ?Sized,
{
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let cell = Cell::new(
            rng.gen_range(0..grid.width()),
            rng.gen_range(0..grid.height()),
        );
        if !occupied.is_occupied(cell) {
            return Some(cell);
        }
    }

    let count = free_cells(grid, occupied).count();
    if count == 0 {
        warn!("no free cell left for food");
        return None;
    }
    free_cells(grid, occupied).nth(rng.gen_range(0..count))
}

fn free_cells<'a, O>(grid: &'a Grid, occupied: &'a O) -> impl Iterator<Item = Cell> + 'a
where
    O: Occupancy + ?Sized,
{
    grid.cells().filter(move |&cell| !occupied.is_occupied(cell))
}
