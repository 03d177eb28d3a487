//! Immutable wall layout of a single level.

use boulder_push_core::{CellCoord, WALL_MARKER};

/// Character map of one level together with its wall cells.
///
/// Rows keep the exact extents they were loaded with, so a short row ends
/// the grid early for the columns beyond it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<String>,
    cells: Vec<Vec<char>>,
}

impl Grid {
    /// Creates a grid from the provided text rows.
    #[must_use]
    pub fn new(rows: Vec<String>) -> Self {
        let cells = rows.iter().map(|row| row.chars().collect()).collect();
        Self { rows, cells }
    }

    /// Text rows the grid was built from.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the cell lies within the stored row extents.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.character(cell).is_some()
    }

    /// Checked wall query, `None` when the cell is outside the grid.
    #[must_use]
    pub fn wall_at(&self, cell: CellCoord) -> Option<bool> {
        self.character(cell).map(|character| character == WALL_MARKER)
    }

    /// Reports whether the cell holds a wall.
    ///
    /// # Panics
    ///
    /// Panics when the cell lies outside the grid. Loaded levels are validated
    /// so that no reachable cell borders the outside, which makes such a query
    /// a broken invariant rather than a gameplay condition.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        match self.wall_at(cell) {
            Some(wall) => wall,
            None => panic!(
                "wall query for cell {cell} outside a {}-row grid",
                self.height()
            ),
        }
    }

    fn character(&self, cell: CellCoord) -> Option<char> {
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        self.cells.get(row)?.get(column).copied()
    }
}
