#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level source that reads the level file and splits it into a level set.
//!
//! A level file is a sequence of text lines. Every line containing the
//! configured marker starts a new level; the marker line and a fixed number
//! of header lines after it are skipped, and the following lines up to the
//! next marker form the level's grid rows.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// Text that identifies the first line of every level in the default format.
pub const DEFAULT_LEVEL_MARKER: &str = "Maze";
/// Number of lines following the marker line that describe the level.
pub const DEFAULT_HEADER_LINES: usize = 6;

/// Describes how levels are delimited inside a level file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelFormat {
    /// Substring that marks the first line of a level.
    pub marker: String,
    /// Number of lines after the marker line that are skipped.
    pub header_lines: usize,
}

impl Default for LevelFormat {
    fn default() -> Self {
        Self {
            marker: DEFAULT_LEVEL_MARKER.to_owned(),
            header_lines: DEFAULT_HEADER_LINES,
        }
    }
}

/// Grid rows of a single level together with the marker line naming it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    title: String,
    rows: Vec<String>,
}

impl Level {
    /// Creates a level from its title and grid rows.
    #[must_use]
    pub fn new<T>(title: T, rows: Vec<String>) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            rows,
        }
    }

    /// Trimmed marker line that introduced the level.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Grid rows of the level, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

/// Ordered, read-only collection of parsed levels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelSet {
    levels: Vec<Level>,
}

impl LevelSet {
    /// Creates a level set from already parsed levels.
    #[must_use]
    pub fn from_levels(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// Splits raw level file lines into levels.
    ///
    /// Lines before the first marker are ignored. Trailing blank rows of each
    /// level are dropped, and levels without any rows are skipped.
    #[must_use]
    pub fn parse<I>(lines: I, format: &LevelFormat) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut levels: Vec<Level> = Vec::new();
        let mut current: Option<Level> = None;
        let mut header_remaining = 0;

        for line in lines {
            let line = line.as_ref();
            if line.contains(format.marker.as_str()) {
                if let Some(level) = current.take() {
                    push_level(&mut levels, level);
                }
                current = Some(Level::new(line.trim(), Vec::new()));
                header_remaining = format.header_lines;
                continue;
            }

            let Some(level) = current.as_mut() else {
                continue;
            };

            if header_remaining > 0 {
                header_remaining -= 1;
                continue;
            }

            level.rows.push(line.to_owned());
        }

        if let Some(level) = current {
            push_level(&mut levels, level);
        }

        tracing::debug!(count = levels.len(), "parsed level set");
        Self { levels }
    }

    /// Number of levels in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Reports whether the set contains no level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level at the provided index, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// Iterator over the levels in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}

fn push_level(levels: &mut Vec<Level>, mut level: Level) {
    while level.rows.last().is_some_and(|row| row.trim().is_empty()) {
        let _ = level.rows.pop();
    }

    if level.rows.is_empty() {
        tracing::warn!(title = level.title(), "skipping level without grid rows");
        return;
    }

    levels.push(level);
}

/// Errors raised while reading a level file.
#[derive(Debug, thiserror::Error)]
pub enum LevelSourceError {
    /// The level file does not exist.
    #[error("level file {} was not found", .path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },
    /// The level file exists but could not be read.
    #[error("failed to read level file {}", .path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Reads every line of the level file at `path`.
pub fn load_level_lines(path: &Path) -> Result<Vec<String>, LevelSourceError> {
    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LevelSourceError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LevelSourceError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    Ok(contents.lines().map(str::to_owned).collect())
}

/// Reads the level file at `path` and splits it into a level set.
pub fn load_level_set(path: &Path, format: &LevelFormat) -> Result<LevelSet, LevelSourceError> {
    let lines = load_level_lines(path)?;
    Ok(LevelSet::parse(lines, format))
}
