mod display;

use std::io::{self, stdout, BufRead, BufWriter, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};

use dino_runner::audio::TerminalBell;
use dino_runner::config::Config;
use dino_runner::entities::{InputEvent, Level};
use dino_runner::menu::{
    clear_screen, pause, prompt_difficulty, prompt_menu_choice, prompt_player_name,
    show_game_over, show_help, show_high_scores, show_main_menu, show_player_stats,
    validate_name, MenuChoice,
};
use dino_runner::records::{ScoreStore, DEFAULT_TOP_LIMIT};
use dino_runner::session::{finalize_session, run_headless, Session, StepOutcome};

/// How long the collision cue is held before the game-over screen.
const CRASH_CUE_HOLD: Duration = Duration::from_millis(600);

// ── Input ─────────────────────────────────────────────────────────────────────

/// Drain every pending key press without blocking.
fn poll_inputs() -> io::Result<Vec<InputEvent>> {
    let mut inputs = Vec::new();
    while event::poll(Duration::ZERO)? {
        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) = event::read()? {
            match code {
                KeyCode::Char(' ') | KeyCode::Up => inputs.push(InputEvent::Jump),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => inputs.push(InputEvent::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    inputs.push(InputEvent::Quit)
                }
                _ => {}
            }
        }
    }
    Ok(inputs)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Variable-delta loop: collect input → advance one tick → stop on a
/// terminal outcome, otherwise render and wait for the next frame.
fn game_loop<W: Write>(out: &mut W, level: Level, config: &Config) -> io::Result<StepOutcome> {
    let mut session = Session::new(level, TerminalBell::new(stdout(), CRASH_CUE_HOLD));
    let frame = config.frame();
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        let inputs = poll_inputs()?;

        let dt = last_tick.elapsed().as_secs_f32();
        last_tick = Instant::now();

        match session.step(dt, &inputs) {
            StepOutcome::Running(_) => {}
            outcome => return Ok(outcome),
        }

        let (width, height) = terminal::size()?;
        display::render(out, session.state(), width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
    }
}

/// Run one windowed session, always restoring the terminal afterwards.
fn play_interactive(level: Level, config: &Config) -> io::Result<StepOutcome> {
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let result = game_loop(&mut out, level, config);

    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

// ── Menu actions ──────────────────────────────────────────────────────────────

fn new_game<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    store: &mut ScoreStore,
    config: &Config,
) -> io::Result<()> {
    let Some(name) = prompt_player_name(input, out)? else {
        return Ok(());
    };
    let Some(level) = prompt_difficulty(input, out)? else {
        return Ok(());
    };

    let score = if config.headless {
        run_headless(level, &name, out)?.state.score
    } else {
        match play_interactive(level, config)? {
            StepOutcome::Crashed { score } => score,
            _ => {
                writeln!(out, "\nGame abandoned. Nothing was saved.")?;
                return pause(input, out);
            }
        }
    };

    let warnings = finalize_session(store, &name, level, score);
    show_game_over(out, &name, level, score, &warnings)?;
    pause(input, out)
}

fn high_scores<R: BufRead, W: Write>(input: &mut R, out: &mut W, store: &ScoreStore) -> io::Result<()> {
    clear_screen(out)?;
    writeln!(out, "========================================")?;
    writeln!(out, "           HIGH SCORES MENU")?;
    writeln!(out, "========================================")?;
    if let Some(level) = prompt_difficulty(input, out)? {
        show_high_scores(out, level, &store.query_top_scores(level, DEFAULT_TOP_LIMIT))?;
    }
    pause(input, out)
}

fn player_scores<R: BufRead, W: Write>(input: &mut R, out: &mut W, store: &ScoreStore) -> io::Result<()> {
    clear_screen(out)?;
    writeln!(out, "========================================")?;
    writeln!(out, "          PLAYER STATISTICS")?;
    writeln!(out, "========================================")?;
    write!(out, "Enter Player Name: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let name = line.trim();

    if validate_name(name).is_err() {
        writeln!(out, "Invalid name format!")?;
    } else {
        match store.find_player_record(name) {
            Some(record) => show_player_stats(out, &record)?,
            None => {
                writeln!(out, "\nPlayer '{}' not found in records.", name)?;
                let known: Vec<String> = store.all_players().into_iter().map(|p| p.name).collect();
                if !known.is_empty() {
                    writeln!(out, "Known players: {}", known.join(", "))?;
                }
            }
        }
    }
    pause(input, out)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_env();
    log::info!("Data directory: {}", config.data_dir.display());
    let mut store = ScoreStore::new(&config.data_dir);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = stdout();

    loop {
        show_main_menu(&mut out)?;
        match prompt_menu_choice(&mut input, &mut out)? {
            MenuChoice::NewGame => new_game(&mut input, &mut out, &mut store, &config)?,
            MenuChoice::HighScores => high_scores(&mut input, &mut out, &store)?,
            MenuChoice::PlayerScores => player_scores(&mut input, &mut out, &store)?,
            MenuChoice::Help => {
                show_help(&mut out)?;
                pause(&mut input, &mut out)?;
            }
            MenuChoice::Exit => {
                writeln!(out, "\nThank you for playing! Goodbye!")?;
                break;
            }
        }
    }
    Ok(())
}
