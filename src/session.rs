//! Game session controller
//!
//! Owns the menu/meta state machine, the tick cadence, the score-driven
//! speed ramp, Challenge-mode lives and the leaderboard. The original
//! arcade build kept the menu cursor and input-debounce timestamps in
//! process-wide globals; here all of that is explicit session state.
//!
//! The front-end calls [`Session::advance_frame`] once per rendered frame;
//! the simulation engine only runs when the frame counter reaches the
//! current tick interval.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{CELL_SIZE, MIN_TICK_INTERVAL, SPEEDUP_BAND};
use crate::highscores::HighScores;
use crate::settings::{Difficulty, Mode};
use crate::sim::{CollisionKind, Direction, Grid, GridError, TickOutcome, tick};

/// Where the player is in the menu/game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Menu,
    NameInput,
    ModeSelection,
    DifficultySelection,
    Playing,
    GameOver,
    Credits,
}

/// What a frame produced, for the presentation layer (sounds, redraws)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Frame below the tick threshold, or not playing; nothing happened
    Idle,
    /// The snake moved one cell; `turned` signals a buffered direction change
    Moved { turned: bool },
    /// The snake ate the food and the score went up by one
    Ate { turned: bool },
    /// Collision consumed a life; the grid was rebuilt, score kept
    LifeLost(CollisionKind),
    /// Terminal collision; the score has been recorded
    GameOver(CollisionKind),
    /// The snake filled the board; the run ends with the score recorded
    Cleared,
}

/// Debounced key acceptance, replacing the original's global timestamps
#[derive(Debug, Clone)]
struct Debounce {
    window: Duration,
    last: Option<Instant>,
}

impl Debounce {
    fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Accept unless a previous acceptance is still inside the window
    fn try_accept(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(prev) if now.duration_since(prev) < self.window => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// A full game session: menu flow, one grid at a time, persistent leaderboard
#[derive(Debug)]
pub struct Session {
    phase: Phase,
    player_name: String,
    mode: Mode,
    difficulty: Difficulty,
    cell_size: i32,
    grid: Option<Grid>,
    score: u32,
    lives: u32,
    /// Frames accumulated toward the next simulation tick
    frame_count: u32,
    tick_interval: u32,
    /// Last score at which the interval dropped, one decrement per band
    last_speedup_score: u32,
    /// Guard so repeated game-over frames record the score once
    score_recorded: bool,
    scores: HighScores,
    /// Seed stream for fresh grids (game start and Challenge respawns)
    seeds: Pcg32,
    enter_debounce: Debounce,
    nav_debounce: Debounce,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: Phase::Menu,
            player_name: String::new(),
            mode: Mode::default(),
            difficulty: Difficulty::default(),
            cell_size: CELL_SIZE,
            grid: None,
            score: 0,
            lives: 0,
            frame_count: 0,
            tick_interval: 0,
            last_speedup_score: 0,
            score_recorded: false,
            scores: HighScores::new(),
            seeds: Pcg32::seed_from_u64(seed),
            enter_debounce: Debounce::new(Duration::from_millis(500)),
            nav_debounce: Debounce::new(Duration::from_millis(200)),
        }
    }

    // === Menu flow ===

    pub fn begin_name_entry(&mut self) {
        if self.phase == Phase::Menu {
            self.phase = Phase::NameInput;
        }
    }

    pub fn open_credits(&mut self) {
        if self.phase == Phase::Menu {
            self.phase = Phase::Credits;
        }
    }

    pub fn close_credits(&mut self) {
        if self.phase == Phase::Credits {
            self.phase = Phase::Menu;
        }
    }

    /// Append a character to the player name; only letters and digits stick
    pub fn push_name_char(&mut self, c: char) {
        if self.phase == Phase::NameInput && c.is_alphanumeric() {
            self.player_name.push(c);
        }
    }

    pub fn backspace_name(&mut self) {
        if self.phase == Phase::NameInput {
            self.player_name.pop();
        }
    }

    /// Confirm the entered name; requires at least one character
    pub fn confirm_name(&mut self) -> bool {
        if self.phase != Phase::NameInput || self.player_name.is_empty() {
            return false;
        }
        if !self.enter_debounce.try_accept() {
            return false;
        }
        self.phase = Phase::ModeSelection;
        true
    }

    pub fn choose_mode(&mut self, mode: Mode) {
        if self.phase == Phase::ModeSelection {
            self.mode = mode;
            self.phase = Phase::DifficultySelection;
        }
    }

    /// Move the difficulty cursor up (debounced, like the original menu nav)
    pub fn select_prev_difficulty(&mut self) {
        if self.phase == Phase::DifficultySelection && self.nav_debounce.try_accept() {
            self.difficulty = self.difficulty.prev();
        }
    }

    /// Move the difficulty cursor down
    pub fn select_next_difficulty(&mut self) {
        if self.phase == Phase::DifficultySelection && self.nav_debounce.try_accept() {
            self.difficulty = self.difficulty.next();
        }
    }

    /// Lock in the difficulty and start playing
    pub fn confirm_difficulty(&mut self) -> Result<bool, GridError> {
        if self.phase != Phase::DifficultySelection || !self.enter_debounce.try_accept() {
            return Ok(false);
        }
        self.start_game()?;
        Ok(true)
    }

    /// Retry from game over with the same name, mode and difficulty
    pub fn retry(&mut self) -> Result<(), GridError> {
        if self.phase == Phase::GameOver {
            self.start_game()?;
        }
        Ok(())
    }

    /// Leave the game-over screen for the main menu (debounced Enter)
    pub fn confirm_game_over(&mut self) -> bool {
        if self.phase != Phase::GameOver || !self.enter_debounce.try_accept() {
            return false;
        }
        self.phase = Phase::Menu;
        true
    }

    // === Gameplay ===

    fn start_game(&mut self) -> Result<(), GridError> {
        self.tick_interval = self.difficulty.base_tick_interval();
        self.lives = match self.mode {
            Mode::Classic => 1,
            Mode::Challenge => self.difficulty.challenge_lives(),
        };
        self.grid = Some(self.fresh_grid()?);
        self.score = 0;
        self.frame_count = 0;
        self.last_speedup_score = 0;
        self.score_recorded = false;
        self.phase = Phase::Playing;
        log::info!(
            "{} starts a {} game on {} ({} lives, interval {})",
            self.player_name,
            self.mode.as_str(),
            self.difficulty.as_str(),
            self.lives,
            self.tick_interval,
        );
        Ok(())
    }

    fn fresh_grid(&mut self) -> Result<Grid, GridError> {
        let seed = self.seeds.random::<u64>();
        match self.mode {
            Mode::Challenge => Grid::with_obstacles(self.cell_size, self.difficulty, seed),
            Mode::Classic => Grid::new(self.cell_size, seed),
        }
    }

    /// Forward a direction request to the grid's input buffer
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        match (&self.phase, self.grid.as_mut()) {
            (Phase::Playing, Some(grid)) => grid.queue_direction(direction),
            _ => false,
        }
    }

    /// Advance one frame; runs the simulation when the tick interval elapses
    pub fn advance_frame(&mut self) -> Result<SessionEvent, GridError> {
        if self.phase != Phase::Playing {
            return Ok(SessionEvent::Idle);
        }
        self.frame_count += 1;
        if self.frame_count < self.tick_interval {
            return Ok(SessionEvent::Idle);
        }
        self.frame_count = 0;

        let Some(grid) = self.grid.as_mut() else {
            return Ok(SessionEvent::Idle);
        };
        match tick(grid) {
            Ok(TickOutcome::Continue) => Ok(SessionEvent::Moved {
                turned: grid.direction_changed(),
            }),
            Ok(TickOutcome::Grew) => {
                let turned = grid.direction_changed();
                self.score += 1;
                self.maybe_speed_up();
                Ok(SessionEvent::Ate { turned })
            }
            Ok(TickOutcome::Collided(kind)) => self.handle_collision(kind),
            Err(GridError::NoFreeCell) => {
                // Food was eaten but nowhere is left to put the next one:
                // the board is full and the run is over.
                self.score += 1;
                self.end_run();
                log::info!("board cleared at score {}", self.score);
                Ok(SessionEvent::Cleared)
            }
            Err(e) => Err(e),
        }
    }

    /// Drop the tick interval once per 5-point score band, floored
    fn maybe_speed_up(&mut self) {
        if self.score % SPEEDUP_BAND != 0 || self.score == self.last_speedup_score {
            return;
        }
        if self.tick_interval > MIN_TICK_INTERVAL {
            self.tick_interval -= 1;
            log::debug!(
                "speed ramp: interval {} at score {}",
                self.tick_interval,
                self.score
            );
        }
        self.last_speedup_score = self.score;
    }

    fn handle_collision(&mut self, kind: CollisionKind) -> Result<SessionEvent, GridError> {
        if self.mode == Mode::Challenge && self.lives > 1 {
            self.lives -= 1;
            self.grid = Some(self.fresh_grid()?);
            self.frame_count = 0;
            log::info!("life lost to {:?}, {} remaining", kind, self.lives);
            Ok(SessionEvent::LifeLost(kind))
        } else {
            self.end_run();
            log::info!("game over ({:?}) at score {}", kind, self.score);
            Ok(SessionEvent::GameOver(kind))
        }
    }

    fn end_run(&mut self) {
        self.phase = Phase::GameOver;
        if !self.score_recorded {
            let rank = self.scores.add_score(self.score, &self.player_name);
            self.score_recorded = true;
            if let Some(rank) = rank {
                log::info!("{} reached rank {}", self.player_name, rank);
            }
        }
    }

    // === Snapshot accessors for the presentation layer ===

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn tick_interval(&self) -> u32 {
        self.tick_interval
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }
}
