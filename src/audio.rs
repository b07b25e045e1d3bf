//! One-shot sound cues triggered by simulation transitions.

use std::io::Write;
use std::thread;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Collision,
}

pub trait AudioPlayer {
    /// Fire and forget.
    fn play(&mut self, cue: Cue);

    /// Start `cue` and return only once it has finished playing.
    fn play_to_end(&mut self, cue: Cue);
}

/// Rings the terminal bell.  The collision cue is a double ring held for
/// `hold` so the game-over transition comes after it.
pub struct TerminalBell<W: Write> {
    out: W,
    hold: Duration,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, hold: Duration) -> Self {
        Self { out, hold }
    }

    fn ring(&mut self, times: usize) {
        let bells = "\x07".repeat(times);
        if let Err(e) = self.out.write_all(bells.as_bytes()).and_then(|_| self.out.flush()) {
            log::debug!("Bell unavailable: {}", e);
        }
    }
}

impl<W: Write> AudioPlayer for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        match cue {
            Cue::Jump => self.ring(1),
            Cue::Collision => self.ring(2),
        }
    }

    fn play_to_end(&mut self, cue: Cue) {
        self.play(cue);
        thread::sleep(self.hold);
    }
}
