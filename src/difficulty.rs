//! Difficulty presets.  Exactly three exist; anything else is rejected.

use std::fmt;
use std::str::FromStr;

use crate::entities::Level;
use crate::error::GameError;

/// Obstacle speed and spawn cadence for one session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyProfile {
    /// Playfield units per tick.
    pub speed: i32,
    pub spawn_interval_secs: f32,
}

pub fn profile(level: Level) -> DifficultyProfile {
    match level {
        Level::Easy => DifficultyProfile { speed: 4, spawn_interval_secs: 2.0 },
        Level::Medium => DifficultyProfile { speed: 7, spawn_interval_secs: 1.5 },
        Level::Hard => DifficultyProfile { speed: 10, spawn_interval_secs: 1.0 },
    }
}

impl Level {
    /// Map a 1-based menu selection to a level.
    pub fn from_choice(choice: u32) -> Result<Level, GameError> {
        match choice {
            1 => Ok(Level::Easy),
            2 => Ok(Level::Medium),
            3 => Ok(Level::Hard),
            other => Err(GameError::InvalidDifficulty(other.to_string())),
        }
    }

    /// Zero-based slot used by per-difficulty counters.
    pub fn index(self) -> usize {
        match self {
            Level::Easy => 0,
            Level::Medium => 1,
            Level::Hard => 2,
        }
    }

    /// Stem of the per-difficulty high-score file.
    pub fn file_stem(self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        }
    }
}

impl FromStr for Level {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(choice) = s.parse::<u32>() {
            return Level::from_choice(choice);
        }
        match s.to_lowercase().as_str() {
            "easy" => Ok(Level::Easy),
            "medium" => Ok(Level::Medium),
            "hard" => Ok(Level::Hard),
            _ => Err(GameError::InvalidDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Easy => write!(f, "Easy"),
            Level::Medium => write!(f, "Medium"),
            Level::Hard => write!(f, "Hard"),
        }
    }
}
