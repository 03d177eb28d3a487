use boulder_push_core::{BlockReason, CellCoord, Direction, MoveOutcome};

use crate::{BoulderMove, Grid, History, HistoryEntry, Level};

/// Resolves a single move request against the level, mutating positions and
/// recording a history entry when anything moved.
///
/// At most one boulder is examined: a boulder behind the pushed boulder
/// always blocks.
pub(crate) fn resolve(level: &mut Level, history: &History, direction: Direction) -> MoveOutcome {
    let from = level.player;
    let to = neighbour(&level.grid, from, direction);

    if level.grid.is_wall(to) {
        return MoveOutcome::Blocked(BlockReason::Wall);
    }

    let Some(index) = level.boulder_at(to) else {
        level.player = to;
        history.push(HistoryEntry {
            player_before: from,
            boulder: None,
        });
        return MoveOutcome::PlayerMoved { from, to };
    };

    let boulder_to = neighbour(&level.grid, to, direction);
    if level.grid.is_wall(boulder_to) {
        return MoveOutcome::Blocked(BlockReason::BoulderAgainstWall);
    }
    if level.boulder_at(boulder_to).is_some() {
        return MoveOutcome::Blocked(BlockReason::BoulderAgainstBoulder);
    }

    let boulder = &mut level.boulders[index];
    boulder.cell = boulder_to;
    let boulder_id = boulder.id;
    level.player = to;
    history.push(HistoryEntry {
        player_before: from,
        boulder: Some(BoulderMove {
            boulder: boulder_id,
            from: to,
        }),
    });

    MoveOutcome::PlayerMovedWithPush {
        from,
        to,
        boulder: boulder_id,
        boulder_to,
    }
}

/// Reverts the most recent recorded move, returning the restored entry.
pub(crate) fn undo(level: &mut Level, history: &History) -> Option<HistoryEntry> {
    let entry = history.pop()?;
    level.player = entry.player_before;

    if let Some(BoulderMove { boulder, from }) = entry.boulder {
        // The boulder has moved since, so it is located by identity.
        match level.boulder_mut(boulder) {
            Some(restored) => restored.cell = from,
            None => tracing::warn!(
                boulder = boulder.get(),
                "history names a boulder missing from the level"
            ),
        }
    }

    Some(entry)
}

fn neighbour(grid: &Grid, cell: CellCoord, direction: Direction) -> CellCoord {
    match cell.step(direction) {
        Some(next) => next,
        None => panic!(
            "step {direction:?} from cell {cell} leaves a {}-row grid",
            grid.height()
        ),
    }
}
