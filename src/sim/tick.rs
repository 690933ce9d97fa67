//! Discrete simulation tick
//!
//! One tick advances the snake by exactly one cell: resolve the buffered
//! direction, compute the new head, check walls, the body and obstacles, then
//! either grow onto food or shuffle forward. A collision leaves the grid
//! untouched (the snake never visibly moves onto the fatal cell) and is
//! reported to the caller; nothing is retried here.

use serde::{Deserialize, Serialize};

use crate::sim::grid::{Grid, GridError};
use crate::sim::placement;

/// What the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Outside the play area
    Wall,
    /// A body segment (index >= 1)
    SelfCollision,
    /// An obstacle cell
    Obstacle,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// The snake moved one cell, length unchanged
    Continue,
    /// The snake ate the food and grew by one segment
    Grew,
    /// The tick failed; the grid was left unmodified
    Collided(CollisionKind),
}

/// Advance the grid by one tick
///
/// The self-collision check runs against the pre-move body with the head
/// excluded: the not-yet-committed new head must be compared to where the
/// body *is*, not where it is about to be. A length-1 snake has an empty body
/// slice and can never self-collide; that is intentional.
///
/// The only error is [`GridError::NoFreeCell`], raised when food was eaten
/// and no free cell remains for the replacement - the board is full.
pub fn tick(grid: &mut Grid) -> Result<TickOutcome, GridError> {
    grid.direction_changed = false;
    if grid.next_direction != grid.direction {
        grid.direction = grid.next_direction;
        grid.direction_changed = true;
    }

    let new_head = grid.snake[0] + grid.direction.delta();

    if !grid.in_bounds(new_head) {
        return Ok(TickOutcome::Collided(CollisionKind::Wall));
    }
    if grid.snake[1..].contains(&new_head) {
        return Ok(TickOutcome::Collided(CollisionKind::SelfCollision));
    }
    if grid.obstacles.contains(&new_head) {
        return Ok(TickOutcome::Collided(CollisionKind::Obstacle));
    }

    if new_head == grid.food {
        grid.snake.insert(0, new_head);
        placement::place_food(grid)?;
        Ok(TickOutcome::Grew)
    } else {
        grid.snake.insert(0, new_head);
        grid.snake.pop();
        Ok(TickOutcome::Continue)
    }
}
