//! Grid state and core simulation types
//!
//! The grid owns the snake body, the food, the obstacles and the buffered
//! direction. Everything the presentation layer may look at is exposed as a
//! read-only snapshot; mutation happens only through [`queue_direction`]
//! (buffered input) and [`crate::sim::tick::tick`].
//!
//! [`queue_direction`]: Grid::queue_direction

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{PLACEMENT_MARGIN, PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH};
use crate::settings::Difficulty;
use crate::sim::placement;

/// A cell coordinate on the grid. Value type, compared by equality.
pub type Position = IVec2;

/// Travel direction of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// One-cell offset for this direction. Y grows downward (screen space).
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if `other` is the exact reverse of `self`
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Construction and placement failures. Collisions are not errors; they are
/// ordinary [`crate::sim::TickOutcome`] values.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(i32),
    #[error(
        "play area of {width}x{height} cells leaves no space inside a \
         {margin}-cell placement margin"
    )]
    PlayAreaTooSmall { width: i32, height: i32, margin: i32 },
    #[error("no free cell left inside the placement margin")]
    NoFreeCell,
}

/// The play grid
///
/// The occupancy map (`cells`) marks the initial snake cell and obstacles as
/// they are placed. It is consulted by obstacle placement only; collision
/// detection always scans the snake and obstacle lists directly, and the map
/// is not updated as the snake moves. The two overlap checks must never be
/// merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub(crate) width: i32,
    pub(crate) height: i32,
    /// Occupancy map, row-major, placement-time only
    pub(crate) cells: Vec<bool>,
    /// Body segments, head at index 0, length >= 1
    pub(crate) snake: Vec<Position>,
    pub(crate) food: Position,
    pub(crate) obstacles: Vec<Position>,
    pub(crate) direction: Direction,
    /// Buffered direction, applied at the start of the next tick
    pub(crate) next_direction: Direction,
    /// Set for the duration of a tick that applied a buffered turn
    pub(crate) direction_changed: bool,
    seed: u64,
    #[serde(skip, default = "unseeded_rng")]
    pub(crate) rng: Pcg32,
}

fn unseeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl Grid {
    /// Create a grid without obstacles (Classic mode)
    ///
    /// `cell_size` divides the fixed play area into cells; the snake starts
    /// as a single segment at the center, moving right, and the first food is
    /// placed immediately.
    pub fn new(cell_size: i32, seed: u64) -> Result<Self, GridError> {
        let mut grid = Self::empty(cell_size, seed)?;
        placement::place_food(&mut grid)?;
        Ok(grid)
    }

    /// Create a grid with difficulty-dependent obstacles (Challenge mode)
    ///
    /// Obstacles are placed once, before the first food, so food placement's
    /// obstacle exclusion holds from the very first apple.
    pub fn with_obstacles(
        cell_size: i32,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<Self, GridError> {
        let mut grid = Self::empty(cell_size, seed)?;
        placement::place_obstacles(&mut grid, difficulty)?;
        placement::place_food(&mut grid)?;
        Ok(grid)
    }

    fn empty(cell_size: i32, seed: u64) -> Result<Self, GridError> {
        if cell_size <= 0 {
            return Err(GridError::InvalidCellSize(cell_size));
        }
        let width = PLAY_AREA_WIDTH / cell_size;
        let height = PLAY_AREA_HEIGHT / cell_size;
        // The random placement span is width - 2*margin; it must be positive
        // or placement would be asked to draw from an empty range.
        if width <= 2 * PLACEMENT_MARGIN || height <= 2 * PLACEMENT_MARGIN {
            return Err(GridError::PlayAreaTooSmall {
                width,
                height,
                margin: PLACEMENT_MARGIN,
            });
        }

        let start = IVec2::new(width / 2, height / 2);
        let mut cells = vec![false; (width * height) as usize];
        cells[(start.y * width + start.x) as usize] = true;

        Ok(Self {
            width,
            height,
            cells,
            snake: vec![start],
            food: IVec2::ZERO, // replaced before the grid is handed out
            obstacles: Vec::new(),
            direction: Direction::Right,
            next_direction: Direction::Right,
            direction_changed: false,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Buffer a direction change for the next tick
    ///
    /// The request is rejected if it is the exact reverse of the current
    /// direction (reversing into one's own neck). Repeated valid requests
    /// within the same tick window simply overwrite the buffer, so the last
    /// one wins.
    pub fn queue_direction(&mut self, requested: Direction) -> bool {
        if requested.is_opposite(self.direction) {
            return false;
        }
        self.next_direction = requested;
        true
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Body segments, head first
    pub fn snake(&self) -> &[Position] {
        &self.snake
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn obstacles(&self) -> &[Position] {
        &self.obstacles
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// True while the most recent tick applied a buffered turn
    /// (move-sound trigger for the presentation layer)
    pub fn direction_changed(&self) -> bool {
        self.direction_changed
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub(crate) fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Row-major index into the occupancy map
    pub(crate) fn cell_index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_dimensions_derive_from_cell_size() {
        let grid = Grid::new(15, 1).unwrap();
        assert_eq!(grid.width(), 500 / 15);
        assert_eq!(grid.height(), 500 / 15);
        assert_eq!(grid.snake().len(), 1);
        assert_eq!(grid.head(), IVec2::new(grid.width() / 2, grid.height() / 2));
        assert_eq!(grid.direction(), Direction::Right);
        assert!(grid.obstacles().is_empty());
    }

    #[test]
    fn oversized_cells_are_rejected() {
        // 250px cells on a 500px play area -> 2x2 cells, no room inside the margin
        assert_eq!(
            Grid::new(250, 1),
            Err(GridError::PlayAreaTooSmall {
                width: 2,
                height: 2,
                margin: 1
            })
        );
        assert_eq!(Grid::new(0, 1), Err(GridError::InvalidCellSize(0)));
        assert_eq!(Grid::new(-15, 1), Err(GridError::InvalidCellSize(-15)));
    }

    #[test]
    fn reverse_direction_is_rejected() {
        let mut grid = Grid::new(15, 7).unwrap();
        assert_eq!(grid.direction(), Direction::Right);
        assert!(!grid.queue_direction(Direction::Left));
        assert_eq!(grid.next_direction, Direction::Right);

        assert!(grid.queue_direction(Direction::Up));
        assert_eq!(grid.next_direction, Direction::Up);
    }

    #[test]
    fn last_buffered_request_wins() {
        let mut grid = Grid::new(15, 7).unwrap();
        assert!(grid.queue_direction(Direction::Up));
        assert!(grid.queue_direction(Direction::Down));
        assert_eq!(grid.next_direction, Direction::Down);
    }

    #[test]
    fn opposites() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }
}
