//! Mode and difficulty configuration
//!
//! All gameplay knobs that the menu flow selects live here.

use serde::{Deserialize, Serialize};

/// Difficulty level, selected from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Starting tick interval, in frames between simulation steps
    pub fn base_tick_interval(&self) -> u32 {
        match self {
            Difficulty::Easy => 15,
            Difficulty::Medium => 10,
            Difficulty::Hard => 5,
        }
    }

    /// Obstacles placed at grid creation in Challenge mode
    pub fn obstacle_count(&self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
        }
    }

    /// Lives granted in Challenge mode
    pub fn challenge_lives(&self) -> u32 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 2,
            Difficulty::Hard => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "normal" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Previous difficulty in menu order, saturating at Easy
    pub fn prev(&self) -> Difficulty {
        match self {
            Difficulty::Easy | Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }

    /// Next difficulty in menu order, saturating at Hard
    pub fn next(&self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Hard => Difficulty::Hard,
        }
    }
}

/// Game mode, selected from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Single life, no obstacles
    #[default]
    Classic,
    /// Obstacles on the grid, lives depend on difficulty
    Challenge,
}

impl Mode {
    pub fn has_obstacles(&self) -> bool {
        matches!(self, Mode::Challenge)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Classic => "Classic",
            Mode::Challenge => "Challenge",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Mode::Classic),
            "challenge" => Some(Mode::Challenge),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_knobs() {
        assert_eq!(Difficulty::Easy.base_tick_interval(), 15);
        assert_eq!(Difficulty::Medium.base_tick_interval(), 10);
        assert_eq!(Difficulty::Hard.base_tick_interval(), 5);
        assert_eq!(Difficulty::Easy.obstacle_count(), 2);
        assert_eq!(Difficulty::Medium.obstacle_count(), 3);
        assert_eq!(Difficulty::Hard.obstacle_count(), 5);
        assert_eq!(Difficulty::Easy.challenge_lives(), 3);
        assert_eq!(Difficulty::Hard.challenge_lives(), 1);
    }

    #[test]
    fn menu_order_saturates() {
        assert_eq!(Difficulty::Easy.prev(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.next(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Hard);
    }

    #[test]
    fn string_round_trips() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("normal"), Some(Difficulty::Medium));
        assert_eq!(Mode::from_str("challenge"), Some(Mode::Challenge));
        assert_eq!(Mode::from_str("arcade"), None);
    }
}
