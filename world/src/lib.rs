#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Boulder Push.
//!
//! The world owns the active level's [`Grid`], the entity store (player,
//! boulders and targets) and the undo [`History`]. All mutations flow through
//! [`apply`]; read access goes through the [`query`] module.

mod grid;
mod history;
mod layout;
mod resolver;

use boulder_push_core::{
    BoulderId, BoulderSnapshot, CellCoord, Command, Direction, Event, MoveOutcome, TargetId,
    WELCOME_BANNER,
};

pub use grid::Grid;
pub use history::{BoulderMove, History, HistoryEntry};

/// Represents the authoritative Boulder Push world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    level: Option<Level>,
    history: History,
}

impl World {
    /// Creates a world with no level loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            level: None,
            history: History::new(),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadLevel { rows } => match layout::parse(rows) {
            Ok(level) => {
                out_events.push(Event::LevelLoaded {
                    boulders: level.boulders.len(),
                    targets: level.targets.len(),
                });
                world.level = Some(level);
                world.history.clear();
            }
            Err(reason) => {
                tracing::debug!(%reason, "level layout rejected");
                out_events.push(Event::LevelRejected { reason });
            }
        },
        Command::Move { direction } => {
            let Some(outcome) = resolve(world, direction) else {
                return;
            };
            match outcome {
                MoveOutcome::Blocked(reason) => {
                    out_events.push(Event::MoveBlocked { direction, reason });
                }
                MoveOutcome::PlayerMoved { from, to } => {
                    out_events.push(Event::PlayerMoved { from, to });
                }
                MoveOutcome::PlayerMovedWithPush {
                    from,
                    to,
                    boulder,
                    boulder_to,
                } => {
                    out_events.push(Event::PlayerMoved { from, to });
                    out_events.push(Event::BoulderPushed {
                        boulder,
                        from: to,
                        to: boulder_to,
                    });
                }
            }
        }
        Command::Undo => {
            let Some(level) = world.level.as_mut() else {
                return;
            };
            match resolver::undo(level, &world.history) {
                Some(entry) => {
                    tracing::debug!(player = %entry.player_before, "move undone");
                    out_events.push(Event::MoveUndone {
                        player: entry.player_before,
                        boulder: entry.boulder.map(|moved| BoulderSnapshot {
                            id: moved.boulder,
                            cell: moved.from,
                        }),
                    });
                }
                None => out_events.push(Event::UndoUnavailable),
            }
        }
    }
}

/// Resolves a move of the player in the provided direction.
///
/// Returns `None` when no level is loaded. Successful moves push exactly one
/// entry onto the world's history; blocked moves record nothing.
///
/// # Panics
///
/// Panics if resolution would inspect a cell outside the grid, which loaded
/// levels rule out by construction.
pub fn resolve(world: &mut World, direction: Direction) -> Option<MoveOutcome> {
    let level = world.level.as_mut()?;
    let outcome = resolver::resolve(level, &world.history, direction);
    tracing::debug!(?direction, ?outcome, "move resolved");
    Some(outcome)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use boulder_push_core::{BoulderId, BoulderSnapshot, CellCoord, TargetSnapshot};

    use super::{Grid, History, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the active level's grid.
    #[must_use]
    pub fn grid(world: &World) -> Option<&Grid> {
        world.level.as_ref().map(|level| &level.grid)
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player(world: &World) -> Option<CellCoord> {
        world.level.as_ref().map(|level| level.player)
    }

    /// Captures the boulders of the active level ordered by identifier.
    #[must_use]
    pub fn boulders(world: &World) -> Vec<BoulderSnapshot> {
        let mut snapshots: Vec<BoulderSnapshot> = world
            .level
            .iter()
            .flat_map(|level| level.boulders.iter())
            .map(|boulder| BoulderSnapshot {
                id: boulder.id,
                cell: boulder.cell,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        snapshots
    }

    /// Captures the targets of the active level ordered by identifier.
    #[must_use]
    pub fn targets(world: &World) -> Vec<TargetSnapshot> {
        let mut snapshots: Vec<TargetSnapshot> = world
            .level
            .iter()
            .flat_map(|level| level.targets.iter())
            .map(|target| TargetSnapshot {
                id: target.id,
                cell: target.cell,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        snapshots
    }

    /// Returns the boulder occupying the provided cell, if any.
    #[must_use]
    pub fn boulder_at(world: &World, cell: CellCoord) -> Option<BoulderId> {
        let level = world.level.as_ref()?;
        level
            .boulder_at(cell)
            .map(|index| level.boulders[index].id)
    }

    /// Reports whether every boulder rests on a target.
    ///
    /// A world without a level is never complete.
    #[must_use]
    pub fn is_complete(world: &World) -> bool {
        world.level.as_ref().is_some_and(|level| level.is_complete())
    }

    /// Number of moves that can currently be undone.
    #[must_use]
    pub fn undo_depth(world: &World) -> usize {
        world.history.len()
    }

    /// Provides read-only access to the undo history.
    #[must_use]
    pub fn history(world: &World) -> &History {
        &world.history
    }
}

#[derive(Clone, Debug)]
struct Level {
    grid: Grid,
    player: CellCoord,
    boulders: Vec<Boulder>,
    targets: Vec<Target>,
}

impl Level {
    /// Index of the first boulder standing on the cell.
    fn boulder_at(&self, cell: CellCoord) -> Option<usize> {
        self.boulders.iter().position(|boulder| boulder.cell == cell)
    }

    fn boulder_mut(&mut self, boulder_id: BoulderId) -> Option<&mut Boulder> {
        self.boulders
            .iter_mut()
            .find(|boulder| boulder.id == boulder_id)
    }

    fn is_complete(&self) -> bool {
        let on_target = self
            .boulders
            .iter()
            .filter(|boulder| self.targets.iter().any(|target| target.cell == boulder.cell))
            .count();
        on_target == self.boulders.len()
    }
}

#[derive(Clone, Copy, Debug)]
struct Boulder {
    id: BoulderId,
    cell: CellCoord,
}

#[derive(Clone, Copy, Debug)]
struct Target {
    id: TargetId,
    cell: CellCoord,
}
