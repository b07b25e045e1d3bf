//! High-score lists and cumulative player statistics.
//!
//! Each difficulty has an append-only text list (`<name> <score>` per line).
//! Player statistics live in one versioned JSON document that is rewritten
//! whole on every update.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::entities::Level;
use crate::error::{StoreError, StoreResult};

/// Number of entries shown on a leaderboard.
pub const DEFAULT_TOP_LIMIT: usize = 10;

const PLAYERS_FILE: &str = "players.json";
const STORE_VERSION: u32 = 1;

/// A single line of a per-difficulty high-score list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Lifetime statistics for one player name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub games_played: u32,
    /// Indexed by `Level::index()`.
    pub games_per_level: [u32; 3],
    pub total_score: u64,
    /// Indexed by `Level::index()`.
    pub best_per_level: [u32; 3],
}

impl PlayerRecord {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Fold one completed game into the counters.
    pub fn record_game(&mut self, level: Level, score: u32) {
        let i = level.index();
        self.games_played = self.games_played.saturating_add(1);
        self.games_per_level[i] = self.games_per_level[i].saturating_add(1);
        self.total_score = self.total_score.saturating_add(u64::from(score));
        self.best_per_level[i] = self.best_per_level[i].max(score);
    }

    pub fn games_at(&self, level: Level) -> u32 {
        self.games_per_level[level.index()]
    }

    pub fn best_at(&self, level: Level) -> u32 {
        self.best_per_level[level.index()]
    }
}

/// On-disk envelope of the player store.
#[derive(Debug, Serialize, Deserialize)]
struct PlayerStore {
    version: u32,
    players: Vec<PlayerRecord>,
}

/// File-backed repository rooted at one data directory.
///
/// Mutating operations take `&mut self`, so a single `ScoreStore` serializes
/// the read-modify-write cycle of its process.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    dir: PathBuf,
}

impl ScoreStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn high_score_path(&self, level: Level) -> PathBuf {
        self.dir.join(format!("{}.txt", level.file_stem()))
    }

    pub fn players_path(&self) -> PathBuf {
        self.dir.join(PLAYERS_FILE)
    }

    // ── High scores ──────────────────────────────────────────────────────────

    /// Append one result to the level's list.
    pub fn append_high_score(&mut self, level: Level, name: &str, score: u32) -> StoreResult<()> {
        let path = self.high_score_path(level);
        self.ensure_dir()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Io { path: path.clone(), source })?;
        writeln!(file, "{} {}", name, score).map_err(|source| StoreError::Io { path, source })?;

        log::debug!("Appended {} {} to {} list", name, score, level);
        Ok(())
    }

    /// Best `limit` results, highest first.  Equal scores keep the order in
    /// which they were recorded.  A missing or unreadable list is empty.
    pub fn query_top_scores(&self, level: Level, limit: usize) -> Vec<HighScoreEntry> {
        let path = self.high_score_path(level);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        // Lines that are not valid UTF-8 are skipped like any other malformed line
        let mut entries: Vec<HighScoreEntry> = bytes
            .split(|&b| b == b'\n')
            .filter_map(|raw| match std::str::from_utf8(raw) {
                Ok(line) => parse_score_line(line),
                Err(_) => {
                    log::debug!("Skipping non-UTF-8 score line in {}", path.display());
                    None
                }
            })
            .collect();
        // Vec::sort_by is stable
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(limit);
        entries
    }

    // ── Player statistics ────────────────────────────────────────────────────

    /// Record one completed game for `name`, creating the record on first
    /// play.  The whole store is rewritten atomically; an unreadable store is
    /// reported instead of being overwritten.
    pub fn upsert_player_record(
        &mut self,
        name: &str,
        level: Level,
        score: u32,
    ) -> StoreResult<PlayerRecord> {
        let mut players = self.load_players()?;

        let idx = match players.iter().position(|p| p.name == name) {
            Some(i) => i,
            None => {
                players.push(PlayerRecord::new(name));
                players.len() - 1
            }
        };
        players[idx].record_game(level, score);
        let updated = players[idx].clone();

        self.save_players(players)?;
        log::info!(
            "Updated stats for {}: {} games, total {}",
            updated.name,
            updated.games_played,
            updated.total_score
        );
        Ok(updated)
    }

    /// Exact, case-sensitive lookup.  `None` when absent or unreadable.
    pub fn find_player_record(&self, name: &str) -> Option<PlayerRecord> {
        self.all_players().into_iter().find(|p| p.name == name)
    }

    /// Every stored record, in insertion order.
    pub fn all_players(&self) -> Vec<PlayerRecord> {
        self.load_players().unwrap_or_else(|e| {
            log::warn!("Treating player store as empty: {}", e);
            Vec::new()
        })
    }

    /// Replace the whole player store with `players`.
    pub fn save_players(&mut self, players: Vec<PlayerRecord>) -> StoreResult<()> {
        let path = self.players_path();
        self.ensure_dir()?;

        let doc = PlayerStore { version: STORE_VERSION, players };
        let json = serde_json::to_string_pretty(&doc).map_err(|e| StoreError::Corrupt {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })?;
        Ok(())
    }

    /// Missing file → empty list.  Anything unparsable is an error.
    pub fn load_players(&self) -> StoreResult<Vec<PlayerRecord>> {
        let path = self.players_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let doc: PlayerStore = serde_json::from_str(&text).map_err(|e| StoreError::Corrupt {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        if doc.version != STORE_VERSION {
            return Err(StoreError::UnsupportedVersion { path, version: doc.version });
        }
        Ok(doc.players)
    }

    fn ensure_dir(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })
    }
}

/// `<name> <score>` where the score is the last whitespace-separated token,
/// so names with interior spaces survive.  Malformed lines yield `None`.
pub fn parse_score_line(line: &str) -> Option<HighScoreEntry> {
    let line = line.trim();
    let (name, score) = line.rsplit_once(char::is_whitespace)?;
    let name = name.trim_end();
    match score.parse::<u32>() {
        Ok(score) if !name.is_empty() => Some(HighScoreEntry {
            name: name.to_string(),
            score,
        }),
        _ => {
            log::debug!("Skipping malformed score line: {:?}", line);
            None
        }
    }
}
