use std::{fs, path::PathBuf};

use boulder_push_system_levels::{
    load_level_lines, load_level_set, LevelFormat, LevelSet, LevelSourceError,
};

const LEVEL_FILE: &str = "\
Boulder Push level pack
Author: nobody

Maze 1
  difficulty: easy
  boulders: 1
  header three
  header four
  header five
  header six
XXXXX
X@*.X
XXXXX

Maze 2
  difficulty: easy
  boulders: 2
  header three
  header four
  header five
  header six
XXXXXX
X@*  X
X *..X
XXXXXX
";

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "boulder-push-levels-{}-{name}.txt",
        std::process::id()
    ));
    fs::write(&path, contents).expect("write scratch level file");
    path
}

#[test]
fn splits_levels_on_marker_and_skips_headers() {
    let set = LevelSet::parse(LEVEL_FILE.lines(), &LevelFormat::default());

    assert_eq!(set.len(), 2);
    let first = set.get(0).expect("first level");
    assert_eq!(first.title(), "Maze 1");
    assert_eq!(first.rows(), ["XXXXX", "X@*.X", "XXXXX"]);

    let second = set.get(1).expect("last level is kept");
    assert_eq!(second.title(), "Maze 2");
    assert_eq!(second.rows(), ["XXXXXX", "X@*  X", "X *..X", "XXXXXX"]);
}

#[test]
fn preamble_before_first_marker_is_ignored() {
    let set = LevelSet::parse(LEVEL_FILE.lines(), &LevelFormat::default());

    assert!(set
        .iter()
        .all(|level| level.rows().iter().all(|row| !row.contains("Author"))));
}

#[test]
fn custom_marker_and_header_count() {
    let lines = ["; Level A", "; by someone", "XXXX", "X@.X", "; Level B", "; by someone", "XXX"];
    let format = LevelFormat {
        marker: "; Level".to_owned(),
        header_lines: 1,
    };

    let set = LevelSet::parse(lines, &format);

    let titles: Vec<_> = set.iter().map(|level| level.title()).collect();
    assert_eq!(titles, ["; Level A", "; Level B"]);
    assert_eq!(set.get(1).map(|level| level.rows().len()), Some(1));
}

#[test]
fn loads_lines_from_disk() {
    let path = scratch_file("lines", LEVEL_FILE);

    let lines = load_level_lines(&path).expect("readable level file");
    let set = load_level_set(&path, &LevelFormat::default()).expect("readable level file");
    fs::remove_file(&path).expect("remove scratch level file");

    assert_eq!(lines.first().map(String::as_str), Some("Boulder Push level pack"));
    assert_eq!(set.len(), 2);
}

#[test]
fn missing_file_reports_not_found() {
    let path = std::env::temp_dir().join("boulder-push-levels-definitely-missing.txt");

    let error = load_level_lines(&path).expect_err("file does not exist");

    assert!(matches!(error, LevelSourceError::NotFound { .. }));
    assert!(error.to_string().contains("was not found"));
}

#[test]
fn directory_reports_io_error() {
    let path = std::env::temp_dir();

    let error = load_level_lines(&path).expect_err("directories are not level files");

    assert!(matches!(error, LevelSourceError::Io { .. }));
}
