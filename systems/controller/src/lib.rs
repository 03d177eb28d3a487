#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level controller that drives a play session through the level set.
//!
//! The controller owns the [`World`] and walks the state machine
//! `Loading → Playing → Completed → Loading(next)`, ending in `Finished`
//! when the player quits or the level set runs out.

use boulder_push_core::{Command, Event, LayoutError, PlayerInput};
use boulder_push_system_levels::LevelSet;
use boulder_push_world::{self as world, query, World};

/// Lifecycle states of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControllerState {
    /// The next level is being prepared.
    Loading,
    /// A level is active and accepts input.
    Playing,
    /// The active level was just solved.
    Completed,
    /// The session ended; no further input is processed.
    Finished,
}

/// Reasons a session may end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FinishReason {
    /// The player asked to quit.
    Quit,
    /// Every level of the set was played or skipped.
    LevelsExhausted,
}

/// Notifications emitted by the controller while processing input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Event forwarded from the world.
    World(Event),
    /// A level became active.
    LevelStarted {
        /// Zero-based index of the level within the set.
        index: usize,
        /// Title line of the level.
        title: String,
    },
    /// A level was skipped because its layout was rejected.
    LevelSkipped {
        /// Zero-based index of the skipped level.
        index: usize,
        /// Reason the world refused the layout.
        reason: LayoutError,
    },
    /// Every boulder of the active level reached a target.
    LevelCompleted {
        /// Zero-based index of the solved level.
        index: usize,
    },
    /// The session ended.
    SessionFinished {
        /// Why the session ended.
        reason: FinishReason,
    },
}

/// Orchestrates level loading, play, completion and advancement.
#[derive(Debug)]
pub struct LevelController {
    levels: LevelSet,
    world: World,
    state: ControllerState,
    level_index: usize,
}

impl LevelController {
    /// Creates a controller that starts with the first level of the set.
    #[must_use]
    pub fn new(levels: LevelSet) -> Self {
        Self::with_start_level(levels, 0)
    }

    /// Creates a controller that starts with the level at `start_level`.
    #[must_use]
    pub fn with_start_level(levels: LevelSet, start_level: usize) -> Self {
        Self {
            levels,
            world: World::new(),
            state: ControllerState::Loading,
            level_index: start_level,
        }
    }

    /// Loads the starting level, skipping any level whose layout is rejected
    /// and completing any level that is already solved when it loads.
    pub fn start(&mut self, out: &mut Vec<ControllerEvent>) {
        if self.state == ControllerState::Loading {
            self.load_current(out);
        }
    }

    /// Processes a single input, forwarding world events and reporting state
    /// transitions.
    pub fn handle(&mut self, input: PlayerInput, out: &mut Vec<ControllerEvent>) {
        self.start(out);
        if self.state != ControllerState::Playing {
            return;
        }

        let command = match input {
            PlayerInput::Quit => {
                self.finish(FinishReason::Quit, out);
                return;
            }
            PlayerInput::Move(direction) => Command::Move { direction },
            PlayerInput::Undo => Command::Undo,
        };

        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        out.extend(events.into_iter().map(ControllerEvent::World));

        if query::is_complete(&self.world) {
            self.complete(out);
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// Reports whether the session has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == ControllerState::Finished
    }

    /// Zero-based index of the active level.
    #[must_use]
    pub const fn level_index(&self) -> usize {
        self.level_index
    }

    /// Title of the active level, if the index points into the set.
    #[must_use]
    pub fn level_title(&self) -> Option<&str> {
        self.levels.get(self.level_index).map(|level| level.title())
    }

    /// Number of levels in the set.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Read-only access to the world for rendering and inspection.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    fn load_current(&mut self, out: &mut Vec<ControllerEvent>) {
        loop {
            self.state = ControllerState::Loading;
            let Some(level) = self.levels.get(self.level_index) else {
                self.finish(FinishReason::LevelsExhausted, out);
                return;
            };
            let title = level.title().to_owned();

            let mut events = Vec::new();
            world::apply(
                &mut self.world,
                Command::LoadLevel {
                    rows: level.rows().to_vec(),
                },
                &mut events,
            );

            let rejection = events.iter().find_map(|event| match event {
                Event::LevelRejected { reason } => Some(reason.clone()),
                _ => None,
            });
            out.extend(events.into_iter().map(ControllerEvent::World));

            if let Some(reason) = rejection {
                tracing::warn!(index = self.level_index, %title, %reason, "skipping level");
                out.push(ControllerEvent::LevelSkipped {
                    index: self.level_index,
                    reason,
                });
                self.level_index += 1;
                continue;
            }

            tracing::info!(index = self.level_index, %title, "level started");
            self.state = ControllerState::Playing;
            out.push(ControllerEvent::LevelStarted {
                index: self.level_index,
                title,
            });

            // Layouts may start solved, e.g. without boulders.
            if query::is_complete(&self.world) {
                self.complete(out);
            }
            return;
        }
    }

    fn complete(&mut self, out: &mut Vec<ControllerEvent>) {
        self.state = ControllerState::Completed;
        tracing::info!(index = self.level_index, "level completed");
        out.push(ControllerEvent::LevelCompleted {
            index: self.level_index,
        });
        self.level_index += 1;
        self.load_current(out);
    }

    fn finish(&mut self, reason: FinishReason, out: &mut Vec<ControllerEvent>) {
        tracing::info!(?reason, "session finished");
        self.state = ControllerState::Finished;
        out.push(ControllerEvent::SessionFinished { reason });
    }
}
