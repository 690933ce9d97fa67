//! Grid Snake - a classic snake arcade game
//!
//! Core modules:
//! - `sim`: Grid simulation (snake movement, collisions, placement)
//! - `session`: Game session controller (tick cadence, lives, menu flow)
//! - `highscores`: In-memory top-10 leaderboard
//! - `settings`: Mode and difficulty configuration
//! - `ui`: Terminal rendering helpers for the front-end binary

pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::HighScores;
pub use session::{Phase, Session, SessionEvent};
pub use settings::{Difficulty, Mode};

/// Game configuration constants
pub mod consts {
    /// Play area size in pixels (square, divided into cells)
    pub const PLAY_AREA_WIDTH: i32 = 500;
    pub const PLAY_AREA_HEIGHT: i32 = 500;
    /// Default cell size in pixels
    pub const CELL_SIZE: i32 = 15;

    /// Inset from the play area border inside which food and obstacles spawn
    pub const PLACEMENT_MARGIN: i32 = 1;

    /// Tick interval floor - the speed ramp never goes faster than this
    pub const MIN_TICK_INTERVAL: u32 = 3;
    /// The tick interval drops by one each time the score crosses a
    /// multiple of this
    pub const SPEEDUP_BAND: u32 = 5;

    /// Frame pacing for the terminal front-end
    pub const FRAMES_PER_SECOND: u64 = 60;
}
