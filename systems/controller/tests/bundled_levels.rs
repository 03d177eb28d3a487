use std::path::PathBuf;

use boulder_push_core::{Direction, PlayerInput};
use boulder_push_system_controller::{ControllerEvent, FinishReason, LevelController};
use boulder_push_system_levels::{load_level_set, LevelFormat};

fn bundled_levels() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../levels/maps.txt")
}

fn moves(keys: &str) -> impl Iterator<Item = PlayerInput> + '_ {
    keys.chars().map(|key| {
        PlayerInput::Move(match key {
            'U' => Direction::Up,
            'D' => Direction::Down,
            'L' => Direction::Left,
            'R' => Direction::Right,
            other => panic!("unknown move {other}"),
        })
    })
}

#[test]
fn bundled_levels_load_without_rejection() {
    let set = load_level_set(&bundled_levels(), &LevelFormat::default())
        .expect("bundled level file is readable");
    assert_eq!(set.len(), 4);

    let mut controller = LevelController::new(set);
    let mut out = Vec::new();
    controller.start(&mut out);

    assert!(!out
        .iter()
        .any(|event| matches!(event, ControllerEvent::LevelSkipped { .. })));
    assert_eq!(controller.level_title(), Some("Maze: 1"));
}

#[test]
fn bundled_levels_are_solvable_in_order() {
    let set = load_level_set(&bundled_levels(), &LevelFormat::default())
        .expect("bundled level file is readable");
    let solutions = ["R", "ULRR", "DRRUULDLLUUDDRRUUULL", "LUUURDLDDRRULUURDLDR"];

    let mut controller = LevelController::new(set);
    let mut out = Vec::new();
    controller.start(&mut out);

    for (index, solution) in solutions.iter().enumerate() {
        assert_eq!(controller.level_index(), index);
        out.clear();
        for input in moves(solution) {
            controller.handle(input, &mut out);
        }
        assert!(
            out.contains(&ControllerEvent::LevelCompleted { index }),
            "level {index} should be solved by {solution}"
        );
    }

    assert_eq!(
        out.last(),
        Some(&ControllerEvent::SessionFinished {
            reason: FinishReason::LevelsExhausted
        })
    );
}
