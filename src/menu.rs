//! Line-oriented menu shell.  Every screen takes its reader and writer as
//! parameters so the prompts can be driven from tests.

use std::io::{self, BufRead, Write};

use crossterm::{cursor, terminal, QueueableCommand};

use crate::entities::Level;
use crate::error::{GameError, StoreError};
use crate::records::{HighScoreEntry, PlayerRecord};

pub const MAX_NAME_LEN: usize = 49;

const RULE: &str = "========================================";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    NewGame,
    HighScores,
    PlayerScores,
    Help,
    Exit,
}

impl MenuChoice {
    pub fn from_choice(choice: u32) -> Option<MenuChoice> {
        match choice {
            1 => Some(MenuChoice::NewGame),
            2 => Some(MenuChoice::HighScores),
            3 => Some(MenuChoice::PlayerScores),
            4 => Some(MenuChoice::Help),
            5 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// 1–49 ASCII letters, digits, spaces or underscores.
pub fn validate_name(name: &str) -> Result<(), GameError> {
    let legal = |c: char| c.is_ascii_alphanumeric() || c == ' ' || c == '_';
    if name.is_empty() || name.len() > MAX_NAME_LEN || !name.chars().all(legal) {
        return Err(GameError::InvalidName(name.to_string()));
    }
    Ok(())
}

// ── Input helpers ─────────────────────────────────────────────────────────────

/// Next line without its terminator, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Main menu selection.  End of input counts as Exit.
pub fn prompt_menu_choice<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<MenuChoice> {
    loop {
        let Some(line) = read_line(input)? else {
            return Ok(MenuChoice::Exit);
        };
        if let Some(choice) = line.trim().parse().ok().and_then(MenuChoice::from_choice) {
            return Ok(choice);
        }
        write!(out, "Invalid input! Please enter a number between 1-5: ")?;
        out.flush()?;
    }
}

/// Difficulty submenu; accepts the number or the level name.  `None` at end
/// of input.
pub fn prompt_difficulty<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<Level>> {
    writeln!(out, "\nSelect Difficulty:")?;
    writeln!(out, "1. Easy")?;
    writeln!(out, "2. Medium")?;
    writeln!(out, "3. Hard")?;
    write!(out, "Enter choice (1-3): ")?;
    out.flush()?;

    loop {
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if let Ok(level) = line.parse::<Level>() {
            return Ok(Some(level));
        }
        write!(out, "Invalid input! Please enter 1, 2, or 3: ")?;
        out.flush()?;
    }
}

/// Ask until a legal name is entered.  `None` at end of input.
pub fn prompt_player_name<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<String>> {
    loop {
        write!(out, "\nEnter your name (letters, numbers, spaces only): ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        let name = line.trim();
        match validate_name(name) {
            Ok(()) => return Ok(Some(name.to_string())),
            Err(_) => writeln!(out, "Invalid name! Please use only letters, numbers, and spaces.")?,
        }
    }
}

/// Wait for Enter (or end of input).
pub fn pause<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<()> {
    write!(out, "\nPress Enter to continue...")?;
    out.flush()?;
    read_line(input)?;
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()
}

pub fn show_main_menu<W: Write>(out: &mut W) -> io::Result<()> {
    clear_screen(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "          CHROME DINO GAME")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "1. New Game")?;
    writeln!(out, "2. Show High Scores")?;
    writeln!(out, "3. Show Player Scores")?;
    writeln!(out, "4. Help")?;
    writeln!(out, "5. Exit")?;
    writeln!(out, "{}", RULE)?;
    write!(out, "Enter your choice (1-5): ")?;
    out.flush()
}

pub fn show_help<W: Write>(out: &mut W) -> io::Result<()> {
    clear_screen(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "              HOW TO PLAY")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "\n1. Press SPACE (or UP) to jump")?;
    writeln!(out, "2. Avoid the incoming obstacles (cacti)")?;
    writeln!(out, "3. Your score increases every tick you survive")?;
    writeln!(out, "4. Game ends when you hit an obstacle (Q quits early)")?;
    writeln!(out, "\nDIFFICULTY LEVELS:")?;
    writeln!(out, "  - Easy: Slower obstacles, more space")?;
    writeln!(out, "  - Medium: Moderate speed and spacing")?;
    writeln!(out, "  - Hard: Fast obstacles, tight spacing")?;
    writeln!(out, "\nGood luck and have fun!")?;
    writeln!(out, "{}", RULE)
}

pub fn show_high_scores<W: Write>(out: &mut W, level: Level, entries: &[HighScoreEntry]) -> io::Result<()> {
    let title = level.to_string().to_uppercase();
    if entries.is_empty() {
        return writeln!(out, "\n--- No scores recorded yet for {} difficulty ---", title);
    }

    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "      HIGH SCORES - {} MODE", title)?;
    writeln!(out, "{}", RULE)?;
    for (rank, entry) in entries.iter().enumerate() {
        writeln!(out, "{}. {} - {}", rank + 1, entry.name, entry.score)?;
    }
    writeln!(out, "{}", RULE)
}

pub fn show_player_stats<W: Write>(out: &mut W, record: &PlayerRecord) -> io::Result<()> {
    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "Player Name: {}", record.name)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Total Games Played: {}", record.games_played)?;
    writeln!(out, "Total Score: {}", record.total_score)?;
    writeln!(out, "\nGames by Difficulty:")?;
    writeln!(out, "  Easy:   {} games", record.games_at(Level::Easy))?;
    writeln!(out, "  Medium: {} games", record.games_at(Level::Medium))?;
    writeln!(out, "  Hard:   {} games", record.games_at(Level::Hard))?;
    writeln!(out, "\nBest Scores:")?;
    writeln!(out, "  Easy:   {}", record.best_at(Level::Easy))?;
    writeln!(out, "  Medium: {}", record.best_at(Level::Medium))?;
    writeln!(out, "  Hard:   {}", record.best_at(Level::Hard))?;
    writeln!(out, "{}", RULE)
}

pub fn show_game_over<W: Write>(
    out: &mut W,
    name: &str,
    level: Level,
    score: u32,
    warnings: &[StoreError],
) -> io::Result<()> {
    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "             GAME OVER!")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Player: {}", name)?;
    writeln!(out, "Final Score: {}", score)?;
    writeln!(out, "Difficulty: {}", level)?;
    writeln!(out, "{}", RULE)?;
    if warnings.is_empty() {
        writeln!(out, "Score saved successfully!")
    } else {
        for w in warnings {
            writeln!(out, "Warning: {}", w)?;
        }
        writeln!(out, "Your result was not fully saved.")
    }
}
