#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Boulder Push engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the level controller. Adapters translate raw
//! input into [`PlayerInput`] values, the controller turns those into
//! [`Command`] values, the world executes commands via its `apply` entry
//! point and reports what happened through [`Event`] values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Boulder Push.";

/// Character that marks a wall cell in level rows.
pub const WALL_MARKER: char = 'X';
/// Character that marks the player's starting cell in level rows.
pub const PLAYER_MARKER: char = '@';
/// Character that marks a boulder's starting cell in level rows.
pub const BOULDER_MARKER: char = '*';
/// Character that marks a target cell in level rows.
pub const TARGET_MARKER: char = '.';

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the active level with the layout described by the rows.
    LoadLevel {
        /// Text rows of the level grid, top to bottom.
        rows: Vec<String>,
    },
    /// Requests that the player step one cell in the given direction.
    Move {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the most recent successful move be reverted.
    Undo,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a new level layout became active.
    LevelLoaded {
        /// Number of boulders placed in the level.
        boulders: usize,
        /// Number of targets placed in the level.
        targets: usize,
    },
    /// Reports that a level layout could not be loaded.
    LevelRejected {
        /// Specific reason the layout was refused.
        reason: LayoutError,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move.
        to: CellCoord,
    },
    /// Confirms that a boulder was pushed one cell.
    BoulderPushed {
        /// Identifier of the pushed boulder.
        boulder: BoulderId,
        /// Cell the boulder occupied before the push.
        from: CellCoord,
        /// Cell the boulder occupies after the push.
        to: CellCoord,
    },
    /// Reports that a move request left every entity in place.
    MoveBlocked {
        /// Direction of the rejected move.
        direction: Direction,
        /// Specific reason the move was rejected.
        reason: BlockReason,
    },
    /// Confirms that the most recent move was reverted.
    MoveUndone {
        /// Cell the player was restored to.
        player: CellCoord,
        /// Boulder restored alongside the player, if the move was a push.
        boulder: Option<BoulderSnapshot>,
    },
    /// Reports that an undo request found no recorded move.
    UndoUnavailable,
}

/// Symbolic input produced by the input boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Step the player in the provided direction.
    Move(Direction),
    /// Revert the most recent move.
    Undo,
    /// End the session.
    Quit,
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector of the direction expressed as `(row, column)` deltas.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Unique identifier assigned to a boulder when its level loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoulderId(u32);

impl BoulderId {
    /// Creates a new boulder identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a target when its level loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(u32);

impl TargetId {
    /// Creates a new target identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Neighbouring cell one step in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (row_delta, column_delta) = direction.delta();
        let row = self.row.checked_add_signed(row_delta)?;
        let column = self.column.checked_add_signed(column_delta)?;
        Some(CellCoord::new(row, column))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Immutable representation of a single boulder used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoulderSnapshot {
    /// Identifier assigned to the boulder at load time.
    pub id: BoulderId,
    /// Cell currently occupied by the boulder.
    pub cell: CellCoord,
}

/// Immutable representation of a single target used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetSnapshot {
    /// Identifier assigned to the target at load time.
    pub id: TargetId,
    /// Cell the target marks.
    pub cell: CellCoord,
}

/// Result of resolving a single move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing moved.
    Blocked(BlockReason),
    /// The player stepped into a free cell.
    PlayerMoved {
        /// Cell the player left.
        from: CellCoord,
        /// Cell the player entered.
        to: CellCoord,
    },
    /// The player stepped into a boulder's cell, pushing it one cell further.
    PlayerMovedWithPush {
        /// Cell the player left.
        from: CellCoord,
        /// Cell the player entered, previously held by the boulder.
        to: CellCoord,
        /// Identifier of the pushed boulder.
        boulder: BoulderId,
        /// Cell the boulder was pushed into.
        boulder_to: CellCoord,
    },
}

impl MoveOutcome {
    /// Reports whether any entity changed position.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}

/// Reasons a move request may leave every entity in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockReason {
    /// The player would walk into a wall.
    Wall,
    /// The pushed boulder would move into a wall.
    BoulderAgainstWall,
    /// The pushed boulder would move into another boulder.
    BoulderAgainstBoulder,
}

/// Reasons a level layout may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// No player start marker was found in the rows.
    #[error("level has no player start marker")]
    MissingPlayer,
    /// More than one player start marker was found.
    #[error("level has {count} player start markers, expected exactly one")]
    MultiplePlayers {
        /// Number of player markers encountered.
        count: usize,
    },
    /// The player can reach a cell whose neighbour lies outside the grid.
    #[error("level is not enclosed: cell {cell} borders the edge of the grid")]
    OpenBoundary {
        /// Reachable cell adjacent to the outside of the grid.
        cell: CellCoord,
    },
}
