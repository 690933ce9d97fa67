//! High score leaderboard
//!
//! Memory-resident ranked list, top 10 scores for the process lifetime.
//! Sorted descending by value; equal scores keep insertion order.

use serde::{Deserialize, Serialize};

/// Maximum number of entries the leaderboard keeps
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player name as entered in the menu
    pub name: String,
    /// Final score of the run
    pub value: u32,
}

/// Ranked score list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    /// Create an empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished run
    ///
    /// Inserts before the first strictly smaller value, so ties land after
    /// existing equal scores (stable). Returns the 1-based rank if the entry
    /// survived the top-10 cut.
    pub fn add_score(&mut self, value: u32, name: &str) -> Option<usize> {
        let pos = self
            .entries
            .iter()
            .position(|e| value > e.value)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            pos,
            ScoreEntry {
                name: name.to_owned(),
                value,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        if pos < MAX_HIGH_SCORES {
            Some(pos + 1)
        } else {
            None
        }
    }

    /// Entries in rank order, best first
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_top_ten_descending() {
        let mut scores = HighScores::new();
        for value in [5, 12, 3, 30, 8, 1, 22, 17, 9, 4, 11] {
            scores.add_score(value, "p");
        }
        assert_eq!(scores.len(), MAX_HIGH_SCORES);
        let values: Vec<u32> = scores.entries().iter().map(|e| e.value).collect();
        assert_eq!(values, [30, 22, 17, 12, 11, 9, 8, 5, 4, 3]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut scores = HighScores::new();
        scores.add_score(10, "first");
        scores.add_score(10, "second");
        scores.add_score(10, "third");
        let names: Vec<&str> = scores.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn rank_is_one_based() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(10, "a"), Some(1));
        assert_eq!(scores.add_score(20, "b"), Some(1));
        assert_eq!(scores.add_score(15, "c"), Some(2));
        assert_eq!(scores.top_score(), Some(20));
    }

    #[test]
    fn eleventh_worst_score_is_dropped() {
        let mut scores = HighScores::new();
        for value in 1..=10 {
            scores.add_score(value, "p");
        }
        assert_eq!(scores.add_score(0, "loser"), None);
        assert_eq!(scores.len(), MAX_HIGH_SCORES);
        assert!(scores.entries().iter().all(|e| e.name != "loser"));
    }

    #[test]
    fn zero_scores_are_still_recorded() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, "newbie"), Some(1));
        assert_eq!(scores.len(), 1);
    }
}
