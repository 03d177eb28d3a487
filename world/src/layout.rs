use std::collections::{HashSet, VecDeque};

use boulder_push_core::{
    BoulderId, CellCoord, Direction, LayoutError, TargetId, BOULDER_MARKER, PLAYER_MARKER,
    TARGET_MARKER,
};

use crate::{Boulder, Grid, Level, Target};

/// Builds a level from its text rows, assigning fresh identifiers in
/// row-major order.
pub(crate) fn parse(rows: Vec<String>) -> Result<Level, LayoutError> {
    let mut players: Vec<CellCoord> = Vec::new();
    let mut boulders: Vec<Boulder> = Vec::new();
    let mut targets: Vec<Target> = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        for (column_index, character) in row.chars().enumerate() {
            let cell = CellCoord::new(index_to_u32(row_index), index_to_u32(column_index));
            match character {
                PLAYER_MARKER => players.push(cell),
                BOULDER_MARKER => boulders.push(Boulder {
                    id: BoulderId::new(index_to_u32(boulders.len())),
                    cell,
                }),
                TARGET_MARKER => targets.push(Target {
                    id: TargetId::new(index_to_u32(targets.len())),
                    cell,
                }),
                _ => {}
            }
        }
    }

    let player = match players.as_slice() {
        [] => return Err(LayoutError::MissingPlayer),
        [player] => *player,
        _ => {
            return Err(LayoutError::MultiplePlayers {
                count: players.len(),
            })
        }
    };

    let grid = Grid::new(rows);
    ensure_enclosed(&grid, player)?;

    Ok(Level {
        grid,
        player,
        boulders,
        targets,
    })
}

/// Flood-fills every non-wall cell connected to the player and rejects the
/// layout if any of them has a neighbour outside the grid.
fn ensure_enclosed(grid: &Grid, player: CellCoord) -> Result<(), LayoutError> {
    let mut visited: HashSet<CellCoord> = HashSet::new();
    let mut frontier: VecDeque<CellCoord> = VecDeque::new();
    let _ = visited.insert(player);
    frontier.push_back(player);

    while let Some(cell) = frontier.pop_front() {
        for direction in Direction::ALL {
            let neighbour = cell
                .step(direction)
                .filter(|neighbour| grid.contains(*neighbour))
                .ok_or(LayoutError::OpenBoundary { cell })?;

            if grid.is_wall(neighbour) {
                continue;
            }

            if visited.insert(neighbour) {
                frontier.push_back(neighbour);
            }
        }
    }

    Ok(())
}

fn index_to_u32(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
