//! In-memory high score table.
//!
//! Entries are kept ordered by score descending; ties keep insertion order
//! (an earlier submission outranks a later one with the same score).

use serde::{Deserialize, Serialize};

/// A single table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub name: String,
    pub score: u32,
}

/// The ordered high score table
#[derive(Debug, Clone, Default)]
pub struct ScoreStore {
    entries: Vec<HighScore>,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry at its rank. Stable for equal scores.
    pub fn add(&mut self, name: String, score: u32) {
        let pos = self
            .entries
            .iter()
            .position(|e| e.score < score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, HighScore { name, score });
    }

    /// All entries, best first.
    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
