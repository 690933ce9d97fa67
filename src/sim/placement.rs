//! Random placement of food and obstacles
//!
//! Candidate cells are drawn uniformly inside a one-cell margin from each
//! border. A fixed budget of random draws is tried first; if all of them land
//! on occupied cells, the remaining free cells are scanned exhaustively and
//! one is picked at random. An empty scan is a [`GridError::NoFreeCell`] -
//! placement never retries unboundedly.

use glam::IVec2;
use rand::Rng;

use crate::consts::PLACEMENT_MARGIN;
use crate::settings::Difficulty;
use crate::sim::grid::{Grid, GridError, Position};

/// Random draws before falling back to an exhaustive scan
const RANDOM_DRAW_BUDGET: u32 = 128;

/// Place the food on a random free in-margin cell
///
/// A cell is free if it coincides with no snake segment and no obstacle. The
/// occupancy map is not consulted here; it is stale with respect to the
/// moving snake.
pub fn place_food(grid: &mut Grid) -> Result<(), GridError> {
    let cell = pick_free_cell(grid, |g, pos| {
        !g.snake.contains(&pos) && !g.obstacles.contains(&pos)
    })?;
    grid.food = cell;
    log::trace!("food placed at ({}, {})", cell.x, cell.y);
    Ok(())
}

/// Place the difficulty-dependent number of obstacles, one at a time
///
/// Each candidate is checked against the occupancy map, which records the
/// initial snake cell and every obstacle placed so far. Called once per grid
/// lifetime, before gameplay begins.
pub fn place_obstacles(grid: &mut Grid, difficulty: Difficulty) -> Result<(), GridError> {
    for _ in 0..difficulty.obstacle_count() {
        let cell = pick_free_cell(grid, |g, pos| !g.cells[g.cell_index(pos)])?;
        let index = grid.cell_index(cell);
        grid.cells[index] = true;
        grid.obstacles.push(cell);
    }
    log::debug!(
        "placed {} obstacles for {:?}",
        grid.obstacles.len(),
        difficulty
    );
    Ok(())
}

fn pick_free_cell<F>(grid: &mut Grid, is_free: F) -> Result<Position, GridError>
where
    F: Fn(&Grid, Position) -> bool,
{
    for _ in 0..RANDOM_DRAW_BUDGET {
        let candidate = random_inner_cell(grid);
        if is_free(grid, candidate) {
            return Ok(candidate);
        }
    }

    // Budget exhausted: the board is crowded. Scan what is left.
    let candidates: Vec<Position> = inner_cells(grid.width, grid.height)
        .filter(|&pos| is_free(grid, pos))
        .collect();
    if candidates.is_empty() {
        return Err(GridError::NoFreeCell);
    }
    let index = grid.rng.random_range(0..candidates.len());
    Ok(candidates[index])
}

fn random_inner_cell(grid: &mut Grid) -> Position {
    let x = grid.rng.random_range(PLACEMENT_MARGIN..grid.width - PLACEMENT_MARGIN);
    let y = grid.rng.random_range(PLACEMENT_MARGIN..grid.height - PLACEMENT_MARGIN);
    IVec2::new(x, y)
}

fn inner_cells(width: i32, height: i32) -> impl Iterator<Item = Position> {
    (PLACEMENT_MARGIN..height - PLACEMENT_MARGIN).flat_map(move |y| {
        (PLACEMENT_MARGIN..width - PLACEMENT_MARGIN).map(move |x| IVec2::new(x, y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn in_margin(grid: &Grid, pos: Position) -> bool {
        pos.x >= PLACEMENT_MARGIN
            && pos.x < grid.width() - PLACEMENT_MARGIN
            && pos.y >= PLACEMENT_MARGIN
            && pos.y < grid.height() - PLACEMENT_MARGIN
    }

    #[test]
    fn food_avoids_snake_and_obstacles() {
        for seed in 0..50 {
            let grid = Grid::with_obstacles(15, Difficulty::Hard, seed).unwrap();
            assert!(!grid.snake().contains(&grid.food()));
            assert!(!grid.obstacles().contains(&grid.food()));
            assert!(in_margin(&grid, grid.food()));
        }
    }

    #[test]
    fn hard_mode_places_five_distinct_obstacles() {
        let grid = Grid::with_obstacles(15, Difficulty::Hard, 42).unwrap();
        assert_eq!(grid.obstacles().len(), 5);
        for (i, a) in grid.obstacles().iter().enumerate() {
            for b in &grid.obstacles()[i + 1..] {
                assert_ne!(a, b);
            }
            assert_ne!(*a, grid.head());
            assert!(in_margin(&grid, *a));
        }
    }

    #[test]
    fn obstacle_counts_follow_difficulty() {
        for (difficulty, expected) in [
            (Difficulty::Easy, 2),
            (Difficulty::Medium, 3),
            (Difficulty::Hard, 5),
        ] {
            let grid = Grid::with_obstacles(15, difficulty, 9).unwrap();
            assert_eq!(grid.obstacles().len(), expected);
        }
    }

    #[test]
    fn placement_fails_fast_on_a_full_board() {
        // 125px cells -> 4x4 grid with a 2x2 inner area
        let mut grid = Grid::new(125, 3).unwrap();
        for pos in inner_cells(grid.width(), grid.height()).collect::<Vec<_>>() {
            grid.obstacles.push(pos);
        }
        assert_eq!(place_food(&mut grid), Err(GridError::NoFreeCell));
    }

    #[test]
    fn exhaustive_scan_finds_the_last_free_cell() {
        let mut grid = Grid::new(125, 3).unwrap();
        let inner: Vec<Position> = inner_cells(grid.width(), grid.height()).collect();
        // Occupy everything except one inner cell
        for pos in &inner[1..] {
            grid.obstacles.push(*pos);
        }
        grid.snake.clear();
        grid.snake.push(IVec2::new(0, 0)); // keep the snake off the inner area
        place_food(&mut grid).unwrap();
        assert_eq!(grid.food(), inner[0]);
    }

    proptest! {
        #[test]
        fn food_is_always_in_margin_and_unoccupied(seed in any::<u64>()) {
            let grid = Grid::with_obstacles(15, Difficulty::Hard, seed).unwrap();
            prop_assert!(in_margin(&grid, grid.food()));
            prop_assert!(!grid.snake().contains(&grid.food()));
            prop_assert!(!grid.obstacles().contains(&grid.food()));
        }

        #[test]
        fn same_seed_same_layout(seed in any::<u64>()) {
            let a = Grid::with_obstacles(15, Difficulty::Medium, seed).unwrap();
            let b = Grid::with_obstacles(15, Difficulty::Medium, seed).unwrap();
            prop_assert_eq!(a.food(), b.food());
            prop_assert_eq!(a.obstacles(), b.obstacles());
        }
    }
}
