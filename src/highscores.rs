//! High score leaderboard for finished training runs
//!
//! Stored as JSON: a file on native, a host-managed string in the browser.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Display score at the moment of collision
    pub score: u64,
    /// Simulation ticks survived
    pub ticks: u64,
    /// Host clock (ms) when the run ended
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A run earns a slot with a nonzero score while the board has room,
    /// or by strictly beating the weakest entry once it is full
    pub fn qualifies(&self, score: u64) -> bool {
        match self.entries.last() {
            _ if score == 0 => false,
            _ if self.entries.len() < MAX_HIGH_SCORES => true,
            Some(weakest) => score > weakest.score,
            None => true,
        }
    }

    /// 1-based slot a finished run would take; ties land below existing entries
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.qualifies(score).then(|| {
            let slot = self
                .entries
                .iter()
                .position(|e| score > e.score)
                .unwrap_or(self.entries.len());
            slot + 1
        })
    }

    /// Insert a finished run at its rank, dropping whatever falls off the end
    pub fn add_score(&mut self, score: u64, ticks: u64, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                ticks,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("encoding high scores")
    }

    /// Parse a leaderboard, re-sorting and trimming whatever was stored
    pub fn from_json(json: &str) -> Result<Self> {
        let mut scores: Self = serde_json::from_str(json).context("decoding high scores")?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }

    /// Load from a JSON file; a missing file is an empty leaderboard
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No high scores at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading high scores {}", path.display()))?;
        let scores = Self::from_json(&json)?;
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("writing high scores {}", path.display()))?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
    }

    #[test]
    fn test_sorted_insert() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5, 50, 1.0), Some(1));
        assert_eq!(scores.add_score(9, 90, 2.0), Some(1));
        assert_eq!(scores.add_score(7, 70, 3.0), Some(2));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![9, 7, 5]);
    }

    #[test]
    fn test_truncates_to_max() {
        let mut scores = HighScores::new();
        for s in 1..=(MAX_HIGH_SCORES as u64 + 5) {
            scores.add_score(s, s * 10, s as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(MAX_HIGH_SCORES as u64 + 5));
        // Lowest surviving entry is 6; 6 does not beat it
        assert!(!scores.qualifies(6));
        assert_eq!(scores.potential_rank(7), Some(MAX_HIGH_SCORES));
    }

    #[test]
    fn test_ties_rank_below_existing() {
        let mut scores = HighScores::new();
        scores.add_score(8, 80, 1.0);
        assert_eq!(scores.potential_rank(8), Some(2));
        assert_eq!(scores.add_score(8, 81, 2.0), Some(2));
        assert_eq!(scores.entries[0].ticks, 80);
    }

    #[test]
    fn test_from_json_resorts() {
        let json = r#"{"entries":[{"score":1,"ticks":10,"timestamp":0.0},{"score":4,"ticks":40,"timestamp":0.0}]}"#;
        let scores = HighScores::from_json(json).unwrap();
        assert_eq!(scores.top_score(), Some(4));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("evasion-sim-scores-{}.json", std::process::id()));
        let mut scores = HighScores::new();
        scores.add_score(12, 120, 5.0);
        scores.save(&path).unwrap();
        assert_eq!(HighScores::load(&path).unwrap(), scores);
        std::fs::remove_file(&path).unwrap();
    }
}
