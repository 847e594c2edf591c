use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::viewport::{MAX_CELL_SIZE, MIN_CELL_SIZE};

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// pattern file to start from (plain-text picture, or `x,y` lines for .csv / .coords)
    pub pattern: Option<PathBuf>,

    /// built-in pattern to start from when no file is given: seed, glider, block, blinker
    #[arg(long, default_value = "seed")]
    pub preset: String,

    /// JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// run this many generations without a terminal, then print the live cells
    #[arg(long)]
    pub generations: Option<u64>,

    /// frames between two generations
    #[arg(long)]
    pub tick_rate: Option<u32>,

    /// random seed for random fills
    #[arg(long)]
    pub seed: Option<u64>,

    /// error, warn, info, debug or trace; the terminal front-end shows warn at most
    #[arg(long)]
    pub log_level: Option<String>,

    /// store live cells in bit-packed chunks instead of a flat hash set
    #[arg(long)]
    pub chunked: bool,
}

/// Which `World` implementation holds the live cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Storage {
    #[default]
    Hashed,
    Chunked,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tick_rate: u32,
    /// pixels per cell edge; the terminal front-end counts one character as a
    /// pixel, so the default is the smallest size
    pub cell_size: i32,
    pub min_cell_size: i32,
    pub max_cell_size: i32,
    pub random_density: f64,
    pub frame_interval_ms: u64,
    pub log_level: String,
    pub seed: Option<u64>,
    /// threads used to tally neighbors, 1 steps on the calling thread
    pub shards: usize,
    pub storage: Storage,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: 10,
            cell_size: MIN_CELL_SIZE,
            min_cell_size: MIN_CELL_SIZE,
            max_cell_size: MAX_CELL_SIZE,
            random_density: 0.75,
            frame_interval_ms: 16,
            log_level: "warn".to_string(),
            seed: None,
            shards: 1,
            storage: Storage::Hashed,
        }
    }
}

impl Settings {
    /// Reads the settings file named on the command line, if any, and lets
    /// explicit flags override it.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut settings = match &args.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("could not read settings {}", path.display()))?;
                Self::parse(&text)
                    .with_context(|| format!("invalid settings in {}", path.display()))?
            }
            None => Self::default(),
        };
        if let Some(tick_rate) = args.tick_rate {
            settings.tick_rate = tick_rate;
        }
        if let Some(seed) = args.seed {
            settings.seed = Some(seed);
        }
        if let Some(level) = &args.log_level {
            settings.log_level = level.clone();
        }
        if args.chunked {
            settings.storage = Storage::Chunked;
        }
        Ok(settings)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn log_level(&self) -> Result<log::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown log level {:?}", self.log_level))
    }

    /// The logger shares stdout with the canvas, so interactive runs are
    /// capped at `warn`.
    pub fn logger_level(&self, interactive: bool) -> Result<log::Level> {
        let level = self.log_level()?;
        Ok(if interactive { level.min(log::Level::Warn) } else { level })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::parse(r#"{ "tick_rate": 3, "seed": 42 }"#).unwrap();
        assert_eq!(settings.tick_rate, 3);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.cell_size, MIN_CELL_SIZE);
        assert_eq!(settings.random_density, 0.75);
        assert_eq!(settings.storage, Storage::Hashed);

        let settings = Settings::parse(r#"{ "storage": "chunked", "shards": 4 }"#).unwrap();
        assert_eq!(settings.storage, Storage::Chunked);
        assert_eq!(settings.shards, 4);
    }

    #[test]
    fn test_bad_file() {
        assert!(Settings::parse(r#"{ "tick_rate": "fast" }"#).is_err());
    }

    #[test]
    fn test_flags_override() {
        let args = Args::parse_from(["golrs", "--tick-rate", "4", "--log-level", "debug"]);
        let settings = Settings::resolve(&args).unwrap();
        assert_eq!(settings.tick_rate, 4);
        assert_eq!(settings.log_level().unwrap(), log::Level::Debug);
        assert_eq!(args.preset, "seed");
        assert!(args.pattern.is_none());
        assert_eq!(settings.storage, Storage::Hashed);

        let args = Args::parse_from(["golrs", "glider.cells", "--chunked", "--generations", "8"]);
        let settings = Settings::resolve(&args).unwrap();
        assert_eq!(settings.storage, Storage::Chunked);
        assert_eq!(args.generations, Some(8));
        assert_eq!(args.pattern, Some(PathBuf::from("glider.cells")));
    }

    #[test]
    fn test_unknown_log_level() {
        let settings = Settings {
            log_level: "loud".into(),
            ..Settings::default()
        };
        assert!(settings.log_level().is_err());
        assert!(settings.logger_level(false).is_err());
    }

    #[test]
    fn test_interactive_logging_is_capped() {
        let settings = Settings {
            log_level: "trace".into(),
            ..Settings::default()
        };
        assert_eq!(settings.logger_level(true).unwrap(), log::Level::Warn);
        assert_eq!(settings.logger_level(false).unwrap(), log::Level::Trace);

        let quiet = Settings {
            log_level: "error".into(),
            ..Settings::default()
        };
        assert_eq!(quiet.logger_level(true).unwrap(), log::Level::Error);
    }
}
