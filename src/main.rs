//! Grid Snake entry point
//!
//! Runs the frame loop: drain key events into the session, advance one
//! frame, redraw. All game rules live in the library; this binary only
//! translates keys and paces frames.

use std::io;
use std::thread::sleep;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use grid_snake::consts::FRAMES_PER_SECOND;
use grid_snake::session::{Phase, Session};
use grid_snake::settings::Mode;
use grid_snake::sim::Direction;
use grid_snake::ui::Terminal;

fn main() -> io::Result<()> {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("session seed {seed}");

    let mut session = Session::new(seed);
    let mut term = Terminal::new();
    term.setup()?;
    let result = run(&mut session, &mut term);
    term.restore()?;
    result
}

fn run(session: &mut Session, term: &mut Terminal) -> io::Result<()> {
    let frame = Duration::from_millis(1000 / FRAMES_PER_SECOND);

    loop {
        for key in term.poll_key_events()? {
            if is_ctrl_c(&key) || handle_key(session, &key) {
                return Ok(());
            }
        }

        if let Err(e) = session.advance_frame() {
            log::error!("simulation stopped: {e}");
            return Ok(());
        }

        term.render(session)?;
        sleep(frame);
    }
}

/// Map a key press onto the session for the current phase.
/// Returns true when the player asked to quit.
fn handle_key(session: &mut Session, key: &KeyEvent) -> bool {
    match session.phase() {
        Phase::Menu => match key.code {
            KeyCode::Char('1') => session.begin_name_entry(),
            KeyCode::Char('2') => session.open_credits(),
            KeyCode::Char('3') | KeyCode::Esc => return true,
            _ => {}
        },
        Phase::NameInput => match key.code {
            KeyCode::Enter => {
                session.confirm_name();
            }
            KeyCode::Backspace => session.backspace_name(),
            KeyCode::Char(c) => session.push_name_char(c),
            _ => {}
        },
        Phase::ModeSelection => match key.code {
            KeyCode::Char('1') => session.choose_mode(Mode::Classic),
            KeyCode::Char('2') => session.choose_mode(Mode::Challenge),
            _ => {}
        },
        Phase::DifficultySelection => match key.code {
            KeyCode::Up => session.select_prev_difficulty(),
            KeyCode::Down => session.select_next_difficulty(),
            KeyCode::Enter => {
                if let Err(e) = session.confirm_difficulty() {
                    log::error!("could not start game: {e}");
                    return true;
                }
            }
            _ => {}
        },
        Phase::Playing => {
            if let Some(direction) = direction_for(key.code) {
                session.queue_direction(direction);
            }
        }
        Phase::GameOver => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if let Err(e) = session.retry() {
                    log::error!("could not restart game: {e}");
                    return true;
                }
            }
            KeyCode::Enter => {
                session.confirm_game_over();
            }
            _ => {}
        },
        Phase::Credits => {
            if key.code == KeyCode::Esc {
                session.close_credits();
            }
        }
    }
    false
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
