//! Command-line flags, the optional settings file and their merge.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use boulder_push_rendering_terminal::DEFAULT_TICK;
use boulder_push_system_levels::LevelFormat;
use clap::Parser;
use serde::Deserialize;

/// Level file used when neither flags nor the settings file name one.
pub(crate) const DEFAULT_LEVELS_PATH: &str = "levels/maps.txt";
/// Settings file read from the working directory when present.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "boulder-push.toml";

/// Command-line flags accepted by the `boulder-push` binary.
#[derive(Debug, Default, Parser)]
#[command(name = "boulder-push", about = "Push every boulder onto a target")]
pub(crate) struct Args {
    /// Level file to play.
    #[arg(long, value_name = "PATH")]
    pub(crate) levels: Option<PathBuf>,
    /// Zero-based index of the first level to play.
    #[arg(long, value_name = "N")]
    pub(crate) start_level: Option<usize>,
    /// Milliseconds between two game loop ticks.
    #[arg(long, value_name = "MS")]
    pub(crate) tick_ms: Option<u64>,
    /// Settings file; defaults to `boulder-push.toml` when it exists.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
    /// Write diagnostics to this file. Logging is off without it.
    #[arg(long, value_name = "PATH")]
    pub(crate) log_file: Option<PathBuf>,
}

/// Contents of the optional TOML settings file.
///
/// The level file layout lives in a `[format]` table; keys missing from it
/// keep their defaults.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    levels: Option<PathBuf>,
    start_level: Option<usize>,
    tick_ms: Option<u64>,
    format: LevelFormat,
}

/// Effective settings after merging flags, the settings file and defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) levels: PathBuf,
    pub(crate) start_level: usize,
    pub(crate) tick: Duration,
    pub(crate) format: LevelFormat,
    pub(crate) log_file: Option<PathBuf>,
}

impl Settings {
    /// Reads the settings file, if any, and merges it beneath `args`.
    pub(crate) fn resolve(args: Args) -> Result<Self> {
        let file = match args.config.as_deref() {
            Some(path) => read_file_config(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.is_file() {
                    read_file_config(path)?
                } else {
                    FileConfig::default()
                }
            }
        };
        Self::merge(args, file)
    }

    /// Merges flags over file values over defaults.
    pub(crate) fn merge(args: Args, file: FileConfig) -> Result<Self> {
        let format = file.format;
        if format.marker.is_empty() {
            bail!("level marker must not be empty");
        }

        let tick = match args.tick_ms.or(file.tick_ms) {
            Some(0) => bail!("tick interval must be at least one millisecond"),
            Some(millis) => Duration::from_millis(millis),
            None => DEFAULT_TICK,
        };

        Ok(Self {
            levels: args
                .levels
                .or(file.levels)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LEVELS_PATH)),
            start_level: args.start_level.or(file.start_level).unwrap_or(0),
            tick,
            format,
            log_file: args.log_file,
        })
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    parse_file_config(&contents)
        .with_context(|| format!("failed to parse settings file {}", path.display()))
}

fn parse_file_config(contents: &str) -> Result<FileConfig> {
    toml::from_str(contents).context("invalid settings toml")
}
