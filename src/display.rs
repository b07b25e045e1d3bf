//! Rendering layer — all terminal I/O for the running game lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; playfield coordinates are scaled
//! onto whatever terminal size is available.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use dino_runner::compute::{
    obstacle_rect, player_rect, GROUND_LEVEL, PLAYER_HEIGHT, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH,
};
use dino_runner::entities::{GameState, Level, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::Green;
const C_OBSTACLE: Color = Color::Red;
const C_GROUND: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

/// Maps playfield units onto the terminal cells inside the border.
struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    // Inner area: columns 1..width-1, rows 2..height-2
    fn col(&self, x: i32) -> i32 {
        let inner = i32::from(self.width.saturating_sub(2)).max(1);
        1 + x * inner / PLAYFIELD_WIDTH
    }

    fn row(&self, y: i32) -> i32 {
        let inner = i32::from(self.height.saturating_sub(4)).max(1);
        2 + y * inner / PLAYFIELD_HEIGHT
    }

    fn first_col(&self) -> i32 {
        1
    }

    fn last_col(&self) -> i32 {
        i32::from(self.width) - 2
    }

    fn last_row(&self) -> i32 {
        i32::from(self.height) - 3
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let view = Viewport { width, height };
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, state, &view)?;
    draw_ground(out, &view)?;

    for obstacle in state.obstacles.iter().filter(|o| o.active) {
        fill_rect(out, &view, &obstacle_rect(obstacle), '█', C_OBSTACLE)?;
    }
    fill_rect(out, &view, &player_rect(&state.player), '▓', C_PLAYER)?;

    draw_controls_hint(out, &view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", state.score)))?;

    let level_str = match state.level {
        Level::Easy => "[ EASY ]",
        Level::Medium => "[ MEDIUM ]",
        Level::Hard => "[ HARD ]",
    };
    let level_color = match state.level {
        Level::Easy => Color::Green,
        Level::Medium => Color::Yellow,
        Level::Hard => Color::Red,
    };
    let lx = (view.width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(level_color))?;
    out.queue(Print(level_str))?;

    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_ground<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let row = view.row(GROUND_LEVEL + PLAYER_HEIGHT).min(view.last_row());
    if row < 2 {
        return Ok(());
    }
    let span = (view.last_col() - view.first_col() + 1).max(0) as usize;
    out.queue(cursor::MoveTo(view.first_col() as u16, row as u16))?;
    out.queue(style::SetForegroundColor(C_GROUND))?;
    out.queue(Print("▀".repeat(span)))?;
    Ok(())
}

/// Fill the cells covered by `rect`, clipped to the inner area.  Every
/// on-screen rectangle covers at least one cell.
fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let left = view.col(rect.x).max(view.first_col());
    let right = (view.col(rect.x + rect.w) - 1).max(view.col(rect.x)).min(view.last_col());
    let top = view.row(rect.y).max(2);
    let bottom = (view.row(rect.y + rect.h) - 1).max(view.row(rect.y)).min(view.last_row());
    if left > right || top > bottom {
        return Ok(());
    }

    let line: String = std::iter::repeat(glyph).take((right - left + 1) as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in top..=bottom {
        out.queue(cursor::MoveTo(left as u16, row as u16))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE / ↑ : Jump   Q : Quit"))?;
    Ok(())
}
