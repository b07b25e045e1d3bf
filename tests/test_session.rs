use std::fs;
use std::path::PathBuf;

use dino_runner::audio::{AudioPlayer, Cue};
use dino_runner::entities::{GameStatus, InputEvent, Level};
use dino_runner::records::ScoreStore;
use dino_runner::session::*;

/// Remembers every cue in the order it was requested.
#[derive(Default)]
struct Recorder {
    log: Vec<(Cue, bool)>,
}

impl AudioPlayer for Recorder {
    fn play(&mut self, cue: Cue) {
        self.log.push((cue, false));
    }

    fn play_to_end(&mut self, cue: Cue) {
        self.log.push((cue, true));
    }
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dino_runner_session_{}_{}", std::process::id(), tag));
    let _ = fs::remove_dir_all(&dir);
    dir
}

// ── Session ──────────────────────────────────────────────────────────────────

#[test]
fn jump_input_plays_jump_cue_once() {
    let mut session = Session::new(Level::Easy, Recorder::default());
    let outcome = session.step(0.016, &[InputEvent::Jump]);
    assert!(matches!(outcome, StepOutcome::Running(e) if e.jumped));
    session.step(0.016, &[InputEvent::Jump]);
    assert!(session.state().player.airborne);

    let (_, audio) = session.into_parts();
    assert_eq!(audio.log, vec![(Cue::Jump, false)]);
}

#[test]
fn quit_abandons_without_ticking() {
    let mut session = Session::new(Level::Medium, Recorder::default());
    session.step(0.016, &[]);
    let outcome = session.step(0.016, &[InputEvent::Jump, InputEvent::Quit]);
    assert_eq!(outcome, StepOutcome::Abandoned);
    assert_eq!(session.state().score, 1);

    let (_, audio) = session.into_parts();
    assert!(audio.log.is_empty());
}

#[test]
fn crash_waits_for_collision_cue() {
    // dt=3.0 spawns every tick; the first obstacle reaches the player on tick 177
    let mut session = Session::new(Level::Easy, Recorder::default());
    let mut ticks = 0;
    let score = loop {
        ticks += 1;
        match session.step(3.0, &[]) {
            StepOutcome::Running(_) => assert!(ticks < 1000),
            StepOutcome::Crashed { score } => break score,
            StepOutcome::Abandoned => panic!("nobody quit"),
        }
    };
    assert_eq!(ticks, 177);
    assert_eq!(score, 176);
    assert_eq!(session.state().status, GameStatus::GameOver);

    // Further steps stay crashed and do not replay the cue
    assert_eq!(session.step(3.0, &[InputEvent::Jump]), StepOutcome::Crashed { score });

    let (_, audio) = session.into_parts();
    assert_eq!(audio.log, vec![(Cue::Collision, true)]);
}

// ── finalize_session ─────────────────────────────────────────────────────────

#[test]
fn finalize_writes_score_and_stats() {
    let mut store = ScoreStore::new(scratch_dir("finalize_ok"));
    let warnings = finalize_session(&mut store, "Alice", Level::Hard, 64);
    assert!(warnings.is_empty());

    let top = store.query_top_scores(Level::Hard, 10);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].score, 64);
    let rec = store.find_player_record("Alice").unwrap();
    assert_eq!(rec.best_at(Level::Hard), 64);
    assert_eq!(rec.games_played, 1);
}

#[test]
fn finalize_reports_every_failed_write() {
    let dir = scratch_dir("finalize_fail");
    fs::create_dir_all(dir.parent().unwrap()).unwrap();
    fs::write(&dir, "not a directory").unwrap();
    let mut store = ScoreStore::new(&dir);

    let warnings = finalize_session(&mut store, "Alice", Level::Easy, 3);
    assert_eq!(warnings.len(), 2);
    let _ = fs::remove_file(&dir);
}

// ── run_headless ─────────────────────────────────────────────────────────────

#[test]
fn headless_easy_run_survives_budget() {
    let mut out = Vec::new();
    let report = run_headless(Level::Easy, "bot", &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(report.completed);
    assert_eq!(report.seconds_survived, 10);
    assert_eq!(report.state.score, 100);
    assert_eq!(report.state.status, GameStatus::Playing);
    assert!(text.contains("Player: bot"));
    assert!(text.contains("Difficulty: Easy"));
    assert!(text.contains("JUMP!"));
    assert!(text.contains("Obstacle spawned!"));
    assert!(text.contains("Simulation completed successfully!"));
    assert!(text.contains("Obstacles Dodged: "));
    assert!(text.contains("Final Score: 100"));
}

#[test]
fn headless_score_matches_ticks_survived() {
    for level in [Level::Medium, Level::Hard] {
        let mut out = Vec::new();
        let report = run_headless(level, "bot", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        if report.completed {
            assert_eq!(report.state.score, 100);
        } else {
            assert!(text.contains("COLLISION DETECTED!"));
            assert!(report.state.score < 100);
        }
    }
}
