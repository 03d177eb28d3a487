//! Tracks what the player sees between frames and builds the scene.

use boulder_push_core::{BlockReason, Event};
use boulder_push_rendering::{Hud, Scene};
use boulder_push_system_controller::{ControllerEvent, FinishReason, LevelController};
use boulder_push_world::query;

/// Per-session status derived from controller events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SessionStatus {
    moves: usize,
    message: Option<String>,
    finish: Option<FinishReason>,
}

impl SessionStatus {
    /// Folds a batch of controller events into the status.
    pub(crate) fn observe(&mut self, events: &[ControllerEvent]) {
        for event in events {
            match event {
                ControllerEvent::World(Event::PlayerMoved { .. }) => {
                    self.moves += 1;
                    self.message = None;
                }
                ControllerEvent::World(Event::MoveBlocked { reason, .. }) => {
                    self.message = Some(blocked_message(*reason).to_owned());
                }
                ControllerEvent::World(Event::MoveUndone { .. }) => {
                    self.moves = self.moves.saturating_sub(1);
                    self.message = Some("Move undone.".to_owned());
                }
                ControllerEvent::World(Event::UndoUnavailable) => {
                    self.message = Some("Nothing to undo.".to_owned());
                }
                ControllerEvent::World(_) => {}
                ControllerEvent::LevelStarted { .. } => self.moves = 0,
                ControllerEvent::LevelSkipped { index, reason } => {
                    self.message = Some(format!("Skipped level {}: {reason}.", index + 1));
                }
                ControllerEvent::LevelCompleted { index } => {
                    self.message = Some(format!("Level {} solved!", index + 1));
                }
                ControllerEvent::SessionFinished { reason } => self.finish = Some(*reason),
            }
        }
    }

    /// Moves on the active level that have not been undone.
    pub(crate) const fn moves(&self) -> usize {
        self.moves
    }

    /// Latest transient message.
    pub(crate) fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Line printed once the terminal has been restored.
    pub(crate) fn farewell(&self) -> &'static str {
        match self.finish {
            Some(FinishReason::LevelsExhausted) => "Every level is done. Well played!",
            Some(FinishReason::Quit) | None => "Goodbye.",
        }
    }
}

fn blocked_message(reason: BlockReason) -> &'static str {
    match reason {
        BlockReason::Wall => "A wall is in the way.",
        BlockReason::BoulderAgainstWall => "The boulder is against a wall.",
        BlockReason::BoulderAgainstBoulder => "The boulder is against another boulder.",
    }
}

/// Builds the frame for the controller's current world.
pub(crate) fn compose_scene(controller: &LevelController, status: &SessionStatus) -> Scene {
    let world = controller.world();
    let rows = query::grid(world).map(|grid| grid.rows()).unwrap_or_default();
    let hud = Hud {
        banner: query::welcome_banner(world),
        title: controller.level_title(),
        level_index: controller.level_index(),
        level_count: controller.level_count(),
        moves: status.moves(),
        undo_depth: query::undo_depth(world),
        message: status.message(),
    };

    Scene::compose(
        rows,
        query::player(world),
        &query::boulders(world),
        &query::targets(world),
    )
    .with_hud(hud.lines())
}
