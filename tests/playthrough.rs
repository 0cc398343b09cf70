//! End-to-end playthroughs driven through the console with the offline client.
//!
//! These use the content shipped in `static/` so they also catch broken content files.

use campus_life::llm::OfflineClient;
use campus_life::{
    Console, ContentStore, GameConfig, Phase, PlayerState, RunArtifact, SaveChoice,
};
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn shipped_content() -> ContentStore {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static");
    ContentStore::load(dir).expect("shipped content should load")
}

fn config_in(dir: &TempDir) -> GameConfig {
    let root = dir.path().to_string_lossy().into_owned();
    let config = GameConfig {
        state_dir: vec![root.clone(), "state".into()],
        output_dir: vec![root, "runs".into()],
        ..GameConfig::default()
    };
    config.ensure_dirs().expect("create dirs");
    config
}

// =============================================================================
// Shipped content
// =============================================================================

#[test]
fn shipped_content_is_complete() {
    let content = shipped_content();
    assert_eq!(content.student_count(), 4);
    assert!(content.prompts.start().contains("(2) Load a save"));
    assert!(content.prompts.review().contains("{history}"));
    for student in content.roster() {
        assert!(!student.topics.is_empty(), "{} has no topics", student.id);
    }
}

// =============================================================================
// New game: explore, look at the directory, quit
// =============================================================================

#[tokio::test]
async fn new_game_explore_and_quit() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let mut console = Console::new(Cursor::new("1\n1\n2\n\n0\n"), Vec::new());
    let choice = console.choose_save("menu", &config).unwrap();
    assert_eq!(choice, SaveChoice::New);

    let mut engine = choice
        .open(shipped_content(), Arc::new(OfflineClient::new()), &config)
        .unwrap();
    console.run(&mut engine).await.unwrap();

    let out = String::from_utf8(console.into_output()).unwrap();
    assert!(out.contains("at the student cafeteria"));
    assert!(out.contains("People you know:"));
    assert!(out.contains("Game saved."));
    assert_eq!(engine.phase(), Phase::Exited);

    let saved = PlayerState::load(engine.save_path()).unwrap();
    assert!(!saved.known_students.is_empty());
    assert!(saved.log[0].starts_with("A new semester begins."));
    assert!(!saved.ended);
}

// =============================================================================
// Loaded game: befriend two students and reach the review
// =============================================================================

#[tokio::test]
async fn befriending_two_students_ends_the_semester() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let content = shipped_content();

    let mut state = PlayerState::with_opening(content.prompts.opening());
    state.known_students.meet(content.student("ben").unwrap());
    state.known_students.meet(content.student("mia").unwrap());
    let save = config.state_path().join("save_20240901_090000.json");
    state.save(&save).unwrap();

    let mut script = String::from("2\n1\n");
    for _ in 0..3 {
        script.push_str("3\n1\n3\nfilm club\n");
    }
    for _ in 0..3 {
        script.push_str("3\n2\n3\nhiking\n");
    }
    let mut console = Console::new(Cursor::new(script), Vec::new());

    let choice = console.choose_save("menu", &config).unwrap();
    assert_eq!(choice, SaveChoice::Existing(save.clone()));
    let mut engine = choice
        .open(content, Arc::new(OfflineClient::new()), &config)
        .unwrap();
    console.run(&mut engine).await.unwrap();

    assert_eq!(engine.phase(), Phase::Ended);
    let out = String::from_utf8(console.into_output()).unwrap();
    assert!(out.contains("=== Semester Review ==="));

    let saved = PlayerState::load(&save).unwrap();
    assert!(saved.ended);
    assert_eq!(saved.known_students.get("ben").unwrap().friendship, 15);
    assert_eq!(saved.known_students.get("mia").unwrap().friendship, 15);

    let runs: Vec<_> = fs::read_dir(config.output_path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(runs.len(), 1);
    let artifact: RunArtifact =
        serde_json::from_str(&fs::read_to_string(&runs[0]).unwrap()).unwrap();
    assert_eq!(artifact.review.score, 88);
    assert_eq!(artifact.history, saved.log);
    assert_eq!(artifact.state.known_students, saved.known_students);

    // reopening a finished save does not run the review again
    let mut console = Console::new(Cursor::new("1\n"), Vec::new());
    let mut engine = SaveChoice::Existing(save)
        .open(shipped_content(), Arc::new(OfflineClient::new()), &config)
        .unwrap();
    console.run(&mut engine).await.unwrap();
    let out = String::from_utf8(console.into_output()).unwrap();
    assert!(out.contains("already over"));
    assert_eq!(fs::read_dir(config.output_path()).unwrap().count(), 1);
}
