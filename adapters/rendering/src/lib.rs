#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Boulder Push adapters.
//!
//! Adapters compose a [`Scene`] from world snapshots and hand it to a
//! [`RenderingBackend`], which owns the frame loop and reports player input
//! back through [`FrameInput`].

use anyhow::Result as AnyResult;
use boulder_push_core::{
    BoulderSnapshot, CellCoord, PlayerInput, TargetSnapshot, BOULDER_MARKER, PLAYER_MARKER,
    TARGET_MARKER, WALL_MARKER,
};
use std::time::Duration;

/// RGB color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel intensity.
    pub red: u8,
    /// Green channel intensity.
    pub green: u8,
    /// Blue channel intensity.
    pub blue: u8,
}

impl Color {
    /// Creates a color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Visual content of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Empty floor.
    Floor,
    /// Structural wall.
    Wall,
    /// Target without a boulder on it.
    Target,
    /// Boulder resting off target.
    Boulder,
    /// Boulder resting on a target.
    BoulderOnTarget,
    /// Player standing on floor.
    Player,
    /// Player standing on a target.
    PlayerOnTarget,
}

impl Glyph {
    /// Character drawn for the glyph.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Floor => ' ',
            Self::Wall => WALL_MARKER,
            Self::Target => TARGET_MARKER,
            Self::Boulder | Self::BoulderOnTarget => BOULDER_MARKER,
            Self::Player | Self::PlayerOnTarget => PLAYER_MARKER,
        }
    }

    /// Foreground color the glyph is drawn with.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Floor | Self::Wall => Color::from_rgb_u8(0x9e, 0x9e, 0x9e),
            Self::Target => Color::from_rgb_u8(0xc8, 0x2a, 0x36),
            Self::Boulder => Color::from_rgb_u8(0xff, 0xc1, 0x07),
            Self::BoulderOnTarget => Color::from_rgb_u8(0x2f, 0x95, 0x32),
            Self::Player | Self::PlayerOnTarget => Color::from_rgb_u8(0x58, 0x47, 0xff),
        }
    }
}

/// Glyph grid plus status lines describing one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scene {
    /// Glyph rows, top to bottom. Rows keep the length of the level row.
    pub cells: Vec<Vec<Glyph>>,
    /// Status lines drawn beneath the grid.
    pub hud: Vec<String>,
}

impl Scene {
    /// Composes the glyph grid for a level.
    ///
    /// Entities are layered over the structural rows with the player drawn
    /// above boulders and boulders above targets. Entities outside the rows
    /// are not drawn.
    #[must_use]
    pub fn compose(
        grid_rows: &[String],
        player: Option<CellCoord>,
        boulders: &[BoulderSnapshot],
        targets: &[TargetSnapshot],
    ) -> Self {
        let mut cells: Vec<Vec<Glyph>> = grid_rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|character| {
                        if character == WALL_MARKER {
                            Glyph::Wall
                        } else {
                            Glyph::Floor
                        }
                    })
                    .collect()
            })
            .collect();

        for target in targets {
            if let Some(glyph) = cell_mut(&mut cells, target.cell) {
                *glyph = Glyph::Target;
            }
        }

        for boulder in boulders {
            if let Some(glyph) = cell_mut(&mut cells, boulder.cell) {
                *glyph = match *glyph {
                    Glyph::Target => Glyph::BoulderOnTarget,
                    _ => Glyph::Boulder,
                };
            }
        }

        if let Some(player) = player {
            if let Some(glyph) = cell_mut(&mut cells, player) {
                *glyph = match *glyph {
                    Glyph::Target => Glyph::PlayerOnTarget,
                    _ => Glyph::Player,
                };
            }
        }

        Self {
            cells,
            hud: Vec::new(),
        }
    }

    /// Replaces the status lines.
    #[must_use]
    pub fn with_hud(mut self, hud: Vec<String>) -> Self {
        self.hud = hud;
        self
    }

    /// Glyph drawn at the provided cell, if the cell is part of the grid.
    #[must_use]
    pub fn glyph_at(&self, cell: CellCoord) -> Option<Glyph> {
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        self.cells.get(row)?.get(column).copied()
    }

    /// Plain-text rendition of the glyph grid.
    #[must_use]
    pub fn text_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|glyph| glyph.symbol()).collect())
            .collect()
    }
}

fn cell_mut(cells: &mut [Vec<Glyph>], cell: CellCoord) -> Option<&mut Glyph> {
    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    cells.get_mut(row)?.get_mut(column)
}

/// Status information shown beneath the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud<'a> {
    /// Banner greeting the player.
    pub banner: &'a str,
    /// Title line of the active level.
    pub title: Option<&'a str>,
    /// Zero-based index of the active level.
    pub level_index: usize,
    /// Number of levels in the set.
    pub level_count: usize,
    /// Moves on the active level that have not been undone.
    pub moves: usize,
    /// Number of moves that can be undone.
    pub undo_depth: usize,
    /// Transient message, such as the outcome of the last input.
    pub message: Option<&'a str>,
}

impl Hud<'_> {
    /// Formats the status lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let title = self.title.unwrap_or("-");
        let mut lines = vec![
            String::new(),
            self.banner.to_owned(),
            format!(
                "Level {}/{} ({title})  moves: {}  undo: {}",
                self.level_index + 1,
                self.level_count,
                self.moves,
                self.undo_depth
            ),
            "arrows: move   u / shift-tab: undo   esc: quit".to_owned(),
        ];
        if let Some(message) = self.message {
            lines.push(message.to_owned());
        }
        lines
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Time elapsed since the previous frame.
    pub dt: Duration,
    /// At most one decoded input consumed during this frame.
    pub input: Option<PlayerInput>,
}

/// Decision returned by the scene update closure after each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep running the frame loop.
    Continue,
    /// Stop the frame loop after presenting the current frame.
    Exit,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// Title shown by the backend, if it supports one.
    pub title: String,
    /// Scene content that should be displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Boulder Push scenes.
pub trait RenderingBackend {
    /// Runs the backend until the update closure requests an exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and at
    /// most one input per frame, and may replace the scene before it is drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> FrameControl;
}
