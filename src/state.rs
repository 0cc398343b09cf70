use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SaveError;
use crate::types::{Attributes, KnownStudents};

/// Everything that survives between sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Chronological, append-only record of what happened
    pub log: Vec<String>,
    pub known_students: KnownStudents,
    pub attributes: Attributes,
    /// Set once the end-of-semester review has been generated
    pub ended: bool,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh state whose log starts with the opening narration
    pub fn with_opening(opening: impl Into<String>) -> Self {
        let mut state = Self::new();
        state.record(opening);
        state
    }

    pub fn record(&mut self, entry: impl Into<String>) {
        self.log.push(entry.into());
    }

    /// The last `n` log entries, oldest first
    pub fn recent_log(&self, n: usize) -> &[String] {
        let start = self.log.len().saturating_sub(n);
        &self.log[start..]
    }

    /// Writes the full state as pretty JSON, replacing `path` atomically.
    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        let io_err = |source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        };

        let content = serde_json::to_string_pretty(self).map_err(|source| SaveError::CorruptSave {
            path: path.to_path_buf(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        log::debug!("Saved player state to {:?}", path);
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SaveError> {
        let content = fs::read_to_string(path).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let state = serde_json::from_str(&content).map_err(|source| SaveError::CorruptSave {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded player state from {:?}", path);
        Ok(state)
    }
}

/// Path for a brand new save, named after the local time
pub fn new_save_path(state_dir: &Path) -> PathBuf {
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    state_dir.join(format!("save_{}.json", ts))
}

/// Existing `.json` saves in `state_dir`, sorted by file name
pub fn list_saves(state_dir: &Path) -> Result<Vec<PathBuf>, SaveError> {
    let entries = fs::read_dir(state_dir).map_err(|source| SaveError::Io {
        path: state_dir.to_path_buf(),
        source,
    })?;

    let mut saves: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().map_or(false, |ext| ext == "json"))
        .collect();
    saves.sort();
    Ok(saves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StudentProfile;
    use tempfile::TempDir;

    fn sample_state() -> PlayerState {
        let mut state = PlayerState::with_opening("Welcome to campus.");
        let ben = StudentProfile::new("ben", "Ben", "CS", "Likes robots", vec!["robots".into()]);
        let amy = StudentProfile::new("amy", "Amy", "Art", "Paints", vec!["oil".into()]);
        state.known_students.meet(&ben);
        state.known_students.meet(&amy);
        state.known_students.get_mut("ben").unwrap().friendship = 9;
        state.attributes.restore_energy(5);
        state.record("Met Ben.");
        state
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save_test.json");
        let state = sample_state();

        state.save(&path).unwrap();
        let loaded = PlayerState::load(&path).unwrap();

        assert_eq!(loaded, state);
        assert_eq!(loaded.known_students.ids().collect::<Vec<_>>(), vec!["ben", "amy"]);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_fields_are_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"{"log": [], "attributes": {"energy": 3}}"#).unwrap();

        match PlayerState::load(&path) {
            Err(SaveError::CorruptSave { .. }) => {}
            other => panic!("expected corrupt save, got {:?}", other),
        }
    }

    #[test]
    fn recent_log_takes_the_tail() {
        let mut state = PlayerState::new();
        for i in 0..100 {
            state.record(format!("entry {}", i));
        }
        let tail = state.recent_log(80);
        assert_eq!(tail.len(), 80);
        assert_eq!(tail[0], "entry 20");
        assert_eq!(state.recent_log(500).len(), 100);
    }

    #[test]
    fn lists_only_json_saves() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("save_b.json"), "{}").unwrap();
        fs::write(dir.path().join("save_a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let saves = list_saves(dir.path()).unwrap();
        let names: Vec<_> = saves
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["save_a.json", "save_b.json"]);
    }
}
