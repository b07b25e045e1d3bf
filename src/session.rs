//! Session driver: steps the simulation, sequences audio cues, and hands the
//! final score to the repository.

use std::io::{self, Write};

use crate::audio::{AudioPlayer, Cue};
use crate::compute::{advance, init_state};
use crate::entities::{GameState, GameStatus, InputEvent, Level, TickEvents};
use crate::error::StoreError;
use crate::records::ScoreStore;

/// Result of one interactive step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Running(TickEvents),
    /// Terminal collision.  The collision cue has already finished playing.
    Crashed { score: u32 },
    /// The player quit; nothing is persisted.
    Abandoned,
}

pub struct Session<A: AudioPlayer> {
    state: GameState,
    audio: A,
}

impl<A: AudioPlayer> Session<A> {
    pub fn new(level: Level, audio: A) -> Self {
        log::info!("Session started on {}", level);
        Self {
            state: init_state(level),
            audio,
        }
    }

    /// Read-only snapshot for the renderer.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn step(&mut self, dt: f32, inputs: &[InputEvent]) -> StepOutcome {
        if self.state.status == GameStatus::GameOver {
            return StepOutcome::Crashed { score: self.state.score };
        }
        if inputs.contains(&InputEvent::Quit) {
            log::info!("Session abandoned at score {}", self.state.score);
            return StepOutcome::Abandoned;
        }

        let jump = inputs.contains(&InputEvent::Jump);
        let (next, events) = advance(&self.state, dt, jump);
        self.state = next;

        if events.jumped {
            self.audio.play(Cue::Jump);
        }
        if events.collided {
            self.audio.play_to_end(Cue::Collision);
            log::info!("Session over with score {}", self.state.score);
            return StepOutcome::Crashed { score: self.state.score };
        }
        StepOutcome::Running(events)
    }

    pub fn into_parts(self) -> (GameState, A) {
        (self.state, self.audio)
    }
}

/// Persist a finished session.  Both writes are attempted; every failure is
/// returned as a warning for the caller to show.
pub fn finalize_session(
    store: &mut ScoreStore,
    name: &str,
    level: Level,
    score: u32,
) -> Vec<StoreError> {
    let mut warnings = Vec::new();

    if let Err(e) = store.append_high_score(level, name, score) {
        log::warn!("High score not saved: {}", e);
        warnings.push(e);
    }
    if let Err(e) = store.upsert_player_record(name, level, score) {
        log::warn!("Player stats not saved: {}", e);
        warnings.push(e);
    }

    warnings
}

// ── Non-interactive mode ──────────────────────────────────────────────────────

pub const HEADLESS_STEP_SECS: f32 = 0.1;
pub const HEADLESS_BUDGET_SECS: f32 = 10.0;

#[derive(Clone, Debug)]
pub struct HeadlessReport {
    pub state: GameState,
    /// Whole seconds of simulated time elapsed.
    pub seconds_survived: u32,
    /// True when the time budget ran out before any collision.
    pub completed: bool,
}

/// Play a session without a window: fixed 0.1 s steps for up to 10 s, with
/// an autopilot that jumps on even whole seconds once 0.5 s have passed.
/// Progress lines go to `out`.
pub fn run_headless<W: Write>(level: Level, name: &str, out: &mut W) -> io::Result<HeadlessReport> {
    let mut state = init_state(level);
    let total_ticks = (HEADLESS_BUDGET_SECS / HEADLESS_STEP_SECS).round() as u32;
    let mut elapsed = 0.0_f32;
    let mut ticks = 0;
    let mut completed = true;

    writeln!(out, "========================================")?;
    writeln!(out, "        GAME STARTED (TEXT MODE)")?;
    writeln!(out, "========================================")?;
    writeln!(out, "Player: {}", name)?;
    writeln!(out, "Difficulty: {}", level)?;
    writeln!(out, "Speed: {}", state.obstacle_speed)?;
    writeln!(out, "Spawn Interval: {}s", state.spawn_interval)?;
    writeln!(out, "========================================")?;
    writeln!(out, "\nSimulating game...")?;

    while ticks < total_ticks {
        ticks += 1;
        elapsed = ticks as f32 * HEADLESS_STEP_SECS;
        let second = elapsed as u32;

        let want_jump = second % 2 == 0 && !state.player.airborne && elapsed > 0.5;
        let (next, events) = advance(&state, HEADLESS_STEP_SECS, want_jump);
        state = next;

        if events.jumped {
            writeln!(out, "[{}s] JUMP!", second)?;
        }
        if events.spawned {
            writeln!(out, "[{}s] Obstacle spawned!", second)?;
        }
        if events.collided {
            writeln!(out, "\n[{}s] COLLISION DETECTED!", second)?;
            completed = false;
            break;
        }
        if ticks % 20 == 0 {
            writeln!(
                out,
                "[{}s] Score: {} | Obstacles: {} | Dino Y: {}",
                second, state.score, state.obstacle_count, state.player.y
            )?;
        }
    }

    if completed {
        writeln!(out, "\nSimulation completed successfully!")?;
    }

    let seconds_survived = elapsed as u32;
    writeln!(out, "\n========================================")?;
    writeln!(out, "         SIMULATION ENDED")?;
    writeln!(out, "========================================")?;
    writeln!(out, "Time Survived: {} seconds", seconds_survived)?;
    writeln!(out, "Final Score: {}", state.score)?;
    writeln!(out, "Obstacles Dodged: {}", state.obstacle_count)?;
    writeln!(out, "========================================")?;

    log::info!(
        "Headless session on {} ended after {}s with score {}",
        level,
        seconds_survived,
        state.score
    );

    Ok(HeadlessReport { state, seconds_survived, completed })
}
