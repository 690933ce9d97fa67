//! Grid simulation module
//!
//! All gameplay logic lives here. This module must stay presentation-free:
//! - Discrete ticks only, one cell of movement per tick
//! - Seeded RNG only (one `Pcg32` per grid)
//! - Collisions are reported to the caller, never handled internally

pub mod grid;
pub mod placement;
pub mod tick;

pub use grid::{Direction, Grid, GridError, Position};
pub use tick::{CollisionKind, TickOutcome, tick};
