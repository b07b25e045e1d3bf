//! Runtime configuration, read once at startup from the environment and
//! command line.

use std::path::PathBuf;
use std::time::Duration;

pub const DIR_VAR: &str = "DINO_RUNNER_DIR";
pub const FPS_VAR: &str = "DINO_RUNNER_FPS";
pub const SIMULATE_FLAG: &str = "--simulate";

const DEFAULT_FPS: u32 = 60;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Directory holding the high-score lists and the player store.
    pub data_dir: PathBuf,
    pub fps: u32,
    /// Run New Game sessions without a window, on a fixed time budget.
    pub headless: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_parts(
            std::env::var(DIR_VAR).ok(),
            std::env::var("HOME").ok(),
            std::env::var(FPS_VAR).ok(),
            std::env::args().skip(1),
        )
    }

    /// Same resolution rules as `from_env`, with every input passed in.
    pub fn from_parts<I, S>(
        dir: Option<String>,
        home: Option<String>,
        fps: Option<String>,
        args: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let data_dir = match dir.filter(|d| !d.trim().is_empty()) {
            Some(d) => PathBuf::from(d),
            None => PathBuf::from(home.unwrap_or_else(|| ".".to_string())).join(".dino_runner"),
        };
        let fps = fps
            .and_then(|f| f.trim().parse::<u32>().ok())
            .filter(|&f| f > 0)
            .unwrap_or(DEFAULT_FPS);
        let headless = args.into_iter().any(|a| a.as_ref() == SIMULATE_FLAG);

        Config { data_dir, fps, headless }
    }

    /// Target wall-clock length of one interactive frame.
    pub fn frame(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_home_subdirectory() {
        let cfg = Config::from_parts(None, Some("/home/rex".into()), None, Vec::<String>::new());
        assert_eq!(cfg.data_dir, PathBuf::from("/home/rex/.dino_runner"));
        assert_eq!(cfg.fps, 60);
        assert!(!cfg.headless);
    }

    #[test]
    fn explicit_dir_and_flag_win() {
        let cfg = Config::from_parts(
            Some("/tmp/scores".into()),
            Some("/home/rex".into()),
            Some("30".into()),
            ["--simulate"],
        );
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/scores"));
        assert_eq!(cfg.fps, 30);
        assert!(cfg.headless);
    }

    #[test]
    fn bad_fps_falls_back() {
        let cfg = Config::from_parts(None, None, Some("0".into()), Vec::<String>::new());
        assert_eq!(cfg.fps, 60);
        assert_eq!(cfg.data_dir, PathBuf::from("./.dino_runner"));
        assert_eq!(cfg.frame(), Duration::from_micros(16_666));
    }
}
