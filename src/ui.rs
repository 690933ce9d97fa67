//! Terminal rendering for the front-end binary
//!
//! Thin crossterm wrapper: alternate screen, raw mode, per-phase screens.
//! Nothing in here touches game rules; everything is drawn from read-only
//! session snapshots.

use std::io::{Stdout, Write, stdout};
use std::time::Duration;

use crossterm::event::{Event, KeyEvent, KeyEventKind, poll, read};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::highscores::HighScores;
use crate::session::{Phase, Session};
use crate::settings::Difficulty;
use crate::sim::Grid;

const SNAKE_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const OBSTACLE_CHAR: char = '#';
const LIFE_CHAR: char = '♥';

/// Left margin for menu text screens
const TEXT_X: u16 = 4;

pub struct Terminal {
    stdout: Stdout,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        Self { stdout: stdout() }
    }

    /// Enter the alternate screen and raw mode, hide the cursor
    pub fn setup(&mut self) -> std::io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()
    }

    /// Undo everything `setup` did; call before exiting
    pub fn restore(&mut self) -> std::io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, LeaveAlternateScreen)
    }

    /// Drain all pending key presses without blocking
    pub fn poll_key_events(&mut self) -> std::io::Result<Vec<KeyEvent>> {
        let mut events = Vec::new();
        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                // Key releases are noise on platforms that report them
                if ev.kind != KeyEventKind::Release {
                    events.push(ev);
                }
            }
        }
        Ok(events)
    }

    /// Draw the screen for the session's current phase
    pub fn render(&mut self, session: &Session) -> std::io::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        match session.phase() {
            Phase::Menu => self.draw_menu()?,
            Phase::NameInput => self.draw_name_input(session.player_name())?,
            Phase::ModeSelection => self.draw_mode_selection()?,
            Phase::DifficultySelection => {
                self.draw_difficulty_selection(session.difficulty(), session.scores())?
            }
            Phase::Playing => self.draw_playing(session)?,
            Phase::GameOver => self.draw_game_over(session.score(), session.scores())?,
            Phase::Credits => self.draw_credits()?,
        }
        self.stdout.flush()
    }

    fn print_at(&mut self, x: u16, y: u16, text: &str) -> std::io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(x, y), style::Print(text))
    }

    fn print_lines(&mut self, lines: &[String]) -> std::io::Result<()> {
        for (i, line) in lines.iter().enumerate() {
            self.print_at(TEXT_X, 2 + i as u16, line)?;
        }
        Ok(())
    }

    fn draw_menu(&mut self) -> std::io::Result<()> {
        self.print_lines(&[
            "GRID SNAKE".into(),
            String::new(),
            "1. Start game".into(),
            "2. Credits".into(),
            "3. Quit".into(),
        ])
    }

    fn draw_name_input(&mut self, name: &str) -> std::io::Result<()> {
        self.print_lines(&[
            "Enter your name (letters and digits), then press Enter:".into(),
            String::new(),
            format!("> {name}_"),
        ])
    }

    fn draw_mode_selection(&mut self) -> std::io::Result<()> {
        self.print_lines(&[
            "Choose a game mode".into(),
            String::new(),
            "1. Classic   - single life, open field".into(),
            "2. Challenge - obstacles, extra lives".into(),
        ])
    }

    fn draw_difficulty_selection(
        &mut self,
        selected: Difficulty,
        scores: &HighScores,
    ) -> std::io::Result<()> {
        let mut lines = vec![
            "Choose a difficulty (arrows + Enter)".into(),
            String::new(),
        ];
        for d in Difficulty::ALL {
            let marker = if d == selected { '>' } else { ' ' };
            lines.push(format!("{marker} {}", d.as_str()));
        }
        lines.push(String::new());
        lines.extend(scoreboard_lines(scores));
        self.print_lines(&lines)
    }

    fn draw_playing(&mut self, session: &Session) -> std::io::Result<()> {
        let Some(grid) = session.grid() else {
            return Ok(());
        };

        let hud = format!(
            "Score: {}   Lives: {}",
            session.score(),
            LIFE_CHAR.to_string().repeat(session.lives() as usize)
        );
        self.print_at(0, 0, &hud)?;
        self.draw_grid(grid, 0, 1)
    }

    /// Bordered play field with the snake, food and obstacles
    fn draw_grid(&mut self, grid: &Grid, left: u16, top: u16) -> std::io::Result<()> {
        let width = grid.width() as u16;
        let height = grid.height() as u16;

        let horizontal: String = format!("+{}+", "-".repeat(width as usize));
        self.print_at(left, top, &horizontal)?;
        self.print_at(left, top + height + 1, &horizontal)?;
        for y in 0..height {
            self.print_at(left, top + 1 + y, "|")?;
            self.print_at(left + width + 1, top + 1 + y, "|")?;
        }

        let cell = |x: i32, y: i32| (left + 1 + x as u16, top + 1 + y as u16);
        for pos in grid.obstacles() {
            let (x, y) = cell(pos.x, pos.y);
            self.print_at(x, y, &OBSTACLE_CHAR.to_string())?;
        }
        {
            let (x, y) = cell(grid.food().x, grid.food().y);
            self.print_at(x, y, &FOOD_CHAR.to_string())?;
        }
        for pos in grid.snake() {
            let (x, y) = cell(pos.x, pos.y);
            self.print_at(x, y, &SNAKE_CHAR.to_string())?;
        }
        Ok(())
    }

    fn draw_game_over(&mut self, score: u32, scores: &HighScores) -> std::io::Result<()> {
        let mut lines = vec![
            format!("Game over! Score: {score}"),
            String::new(),
            "R to retry, Enter for the menu".into(),
            String::new(),
        ];
        lines.extend(scoreboard_lines(scores));
        self.print_lines(&lines)
    }

    fn draw_credits(&mut self) -> std::io::Result<()> {
        self.print_lines(&[
            "Credits".into(),
            String::new(),
            "A terminal rendition of the classic arcade snake.".into(),
            String::new(),
            "Esc to return to the menu".into(),
        ])
    }
}

fn scoreboard_lines(scores: &HighScores) -> Vec<String> {
    let mut lines = vec!["High scores".to_string()];
    if scores.is_empty() {
        lines.push("  (none yet)".into());
    }
    for (i, entry) in scores.entries().iter().enumerate() {
        lines.push(format!("  {}. {}: {}", i + 1, entry.name, entry.value));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScores;

    #[test]
    fn scoreboard_lines_are_ranked() {
        let mut scores = HighScores::new();
        scores.add_score(3, "ada");
        scores.add_score(7, "lin");
        let lines = scoreboard_lines(&scores);
        assert_eq!(lines[0], "High scores");
        assert_eq!(lines[1], "  1. lin: 7");
        assert_eq!(lines[2], "  2. ada: 3");
    }

    #[test]
    fn empty_scoreboard_has_a_placeholder() {
        let lines = scoreboard_lines(&HighScores::new());
        assert_eq!(lines[1], "  (none yet)");
    }
}
