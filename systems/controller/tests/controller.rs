use boulder_push_core::{CellCoord, Direction, Event, LayoutError, PlayerInput};
use boulder_push_system_controller::{
    ControllerEvent, ControllerState, FinishReason, LevelController,
};
use boulder_push_system_levels::{Level, LevelSet};
use boulder_push_world::query;

const FIRST: &[&str] = &["XXXXX", "X@*.X", "XXXXX"];
const SECOND: &[&str] = &["XXXXXX", "X@   X", "X*   X", "X.   X", "XXXXXX"];
const NO_PLAYER: &[&str] = &["XXXX", "X*.X", "XXXX"];
const NO_BOULDERS: &[&str] = &["XXXX", "X@.X", "XXXX"];
const EMPTY_ROOM: &[&str] = &["XXXXX", "X@  X", "XXXXX"];

fn set(levels: &[&[&str]]) -> LevelSet {
    LevelSet::from_levels(
        levels
            .iter()
            .enumerate()
            .map(|(index, rows)| {
                Level::new(
                    format!("Maze {}", index + 1),
                    rows.iter().map(|row| (*row).to_owned()).collect(),
                )
            })
            .collect(),
    )
}

fn started(levels: &[&[&str]]) -> LevelController {
    let mut controller = LevelController::new(set(levels));
    let mut out = Vec::new();
    controller.start(&mut out);
    controller
}

fn send(controller: &mut LevelController, input: PlayerInput) -> Vec<ControllerEvent> {
    let mut out = Vec::new();
    controller.handle(input, &mut out);
    out
}

#[test]
fn start_loads_first_level() {
    let mut controller = LevelController::new(set(&[FIRST, SECOND]));
    let mut out = Vec::new();
    controller.start(&mut out);

    assert_eq!(controller.state(), ControllerState::Playing);
    assert_eq!(controller.level_index(), 0);
    assert_eq!(controller.level_title(), Some("Maze 1"));
    assert_eq!(
        out,
        vec![
            ControllerEvent::World(Event::LevelLoaded {
                boulders: 1,
                targets: 1
            }),
            ControllerEvent::LevelStarted {
                index: 0,
                title: "Maze 1".to_owned(),
            },
        ]
    );
}

#[test]
fn solving_a_level_advances_to_the_next() {
    let mut controller = started(&[FIRST, SECOND]);

    let out = send(&mut controller, PlayerInput::Move(Direction::Right));

    assert!(out.contains(&ControllerEvent::LevelCompleted { index: 0 }));
    assert!(out.contains(&ControllerEvent::LevelStarted {
        index: 1,
        title: "Maze 2".to_owned(),
    }));
    assert_eq!(controller.state(), ControllerState::Playing);
    assert_eq!(controller.level_index(), 1);
    assert_eq!(
        query::player(controller.world()),
        Some(CellCoord::new(1, 1))
    );
    assert_eq!(query::undo_depth(controller.world()), 0, "history resets per level");
}

#[test]
fn solving_the_last_level_finishes_the_session() {
    let mut controller = started(&[FIRST]);

    let out = send(&mut controller, PlayerInput::Move(Direction::Right));

    assert_eq!(
        out.last(),
        Some(&ControllerEvent::SessionFinished {
            reason: FinishReason::LevelsExhausted
        })
    );
    assert!(controller.is_finished());
}

#[test]
fn quit_finishes_regardless_of_progress() {
    let mut controller = started(&[SECOND]);
    let _ = send(&mut controller, PlayerInput::Move(Direction::Right));

    let out = send(&mut controller, PlayerInput::Quit);

    assert_eq!(
        out,
        vec![ControllerEvent::SessionFinished {
            reason: FinishReason::Quit
        }]
    );
    assert!(controller.is_finished());
}

#[test]
fn input_after_finish_is_ignored() {
    let mut controller = started(&[SECOND]);
    let _ = send(&mut controller, PlayerInput::Quit);
    let player = query::player(controller.world());

    let out = send(&mut controller, PlayerInput::Move(Direction::Right));

    assert!(out.is_empty());
    assert_eq!(query::player(controller.world()), player);
}

#[test]
fn undo_restores_the_previous_position() {
    let mut controller = started(&[SECOND]);
    let _ = send(&mut controller, PlayerInput::Move(Direction::Right));
    assert_eq!(
        query::player(controller.world()),
        Some(CellCoord::new(1, 2))
    );

    let out = send(&mut controller, PlayerInput::Undo);

    assert_eq!(
        out,
        vec![ControllerEvent::World(Event::MoveUndone {
            player: CellCoord::new(1, 1),
            boulder: None,
        })]
    );
    assert_eq!(
        query::player(controller.world()),
        Some(CellCoord::new(1, 1))
    );
}

#[test]
fn undo_without_history_changes_nothing() {
    let mut controller = started(&[SECOND]);

    let out = send(&mut controller, PlayerInput::Undo);

    assert_eq!(out, vec![ControllerEvent::World(Event::UndoUnavailable)]);
    assert_eq!(controller.state(), ControllerState::Playing);
    assert_eq!(
        query::player(controller.world()),
        Some(CellCoord::new(1, 1))
    );
}

#[test]
fn rejected_levels_are_skipped() {
    let mut controller = LevelController::new(set(&[NO_PLAYER, SECOND]));
    let mut out = Vec::new();
    controller.start(&mut out);

    assert!(out.contains(&ControllerEvent::LevelSkipped {
        index: 0,
        reason: LayoutError::MissingPlayer,
    }));
    assert_eq!(controller.level_index(), 1);
    assert_eq!(controller.state(), ControllerState::Playing);
}

#[test]
fn start_level_past_the_end_finishes_cleanly() {
    let mut controller = LevelController::with_start_level(set(&[FIRST]), 5);
    let mut out = Vec::new();
    controller.start(&mut out);

    assert!(controller.is_finished());
    assert_eq!(controller.level_title(), None);
    assert_eq!(controller.level_count(), 1);
}

#[test]
fn handle_starts_a_session_that_was_never_started() {
    let mut controller = LevelController::new(set(&[SECOND]));

    let out = send(&mut controller, PlayerInput::Move(Direction::Right));

    assert!(matches!(out.first(), Some(ControllerEvent::World(Event::LevelLoaded { .. }))));
    assert_eq!(
        query::player(controller.world()),
        Some(CellCoord::new(1, 2))
    );
}

#[test]
fn level_solved_on_load_completes_without_input() {
    let mut controller = LevelController::new(set(&[NO_BOULDERS, SECOND]));
    let mut out = Vec::new();
    controller.start(&mut out);

    assert!(out.contains(&ControllerEvent::LevelCompleted { index: 0 }));
    assert_eq!(controller.level_index(), 1);
    assert_eq!(controller.state(), ControllerState::Playing);
    assert!(!query::is_complete(controller.world()));
}

#[test]
fn set_of_solved_levels_finishes_on_start() {
    let mut controller = LevelController::new(set(&[NO_BOULDERS, EMPTY_ROOM]));
    let mut out = Vec::new();
    controller.start(&mut out);

    assert!(out.contains(&ControllerEvent::LevelCompleted { index: 1 }));
    assert_eq!(
        out.last(),
        Some(&ControllerEvent::SessionFinished {
            reason: FinishReason::LevelsExhausted
        })
    );
    assert!(controller.is_finished());
}
