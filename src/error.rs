use std::fmt;
use std::io;
use std::path::PathBuf;

/// Rejected user input.  Raised at the input boundary, never by the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Difficulty selection outside 1..=3 (or an unknown name).
    InvalidDifficulty(String),
    /// Player name that is empty, too long, or has illegal characters.
    InvalidName(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidDifficulty(raw) => write!(
                f,
                "Invalid difficulty: '{}'. Must be 1-3 or easy, medium, hard",
                raw
            ),
            GameError::InvalidName(raw) => write!(
                f,
                "Invalid name: '{}'. Use 1-49 letters, digits, spaces or underscores",
                raw
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Failures of the score/stat store.  Always non-fatal for the caller.
#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Corrupt { path: PathBuf, reason: String },
    UnsupportedVersion { path: PathBuf, version: u32 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "could not access {}: {}", path.display(), source)
            }
            StoreError::Corrupt { path, reason } => {
                write!(f, "{} is corrupt: {}", path.display(), reason)
            }
            StoreError::UnsupportedVersion { path, version } => write!(
                f,
                "{} has unsupported format version {}",
                path.display(),
                version
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
