//! Game configuration, read from a small JSON document.
//!
//! ```json
//! {
//!   "model": "gpt-3.5-turbo",
//!   "static_dir": ["static"],
//!   "state_dir": ["state"],
//!   "output_dir": ["runs"]
//! }
//! ```
//!
//! Directories are given as lists of path segments so the same file works on
//! every platform. Every key is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::llm::openai::DEFAULT_API_BASE;
use crate::llm::DEFAULT_TEMPERATURE;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub model: String,
    pub static_dir: Vec<String>,
    pub state_dir: Vec<String>,
    pub output_dir: Vec<String>,
    pub api_base: String,
    pub temperature: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            static_dir: vec!["static".to_string()],
            state_dir: vec!["state".to_string()],
            output_dir: vec!["runs".to_string()],
            api_base: DEFAULT_API_BASE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, segments) in [
            ("static_dir", &self.static_dir),
            ("state_dir", &self.state_dir),
            ("output_dir", &self.output_dir),
        ] {
            if segments.is_empty() {
                anyhow::bail!("config key '{}' must contain at least one path segment", name);
            }
        }
        if self.model.trim().is_empty() {
            anyhow::bail!("config key 'model' must not be empty");
        }
        Ok(())
    }

    pub fn static_path(&self) -> PathBuf {
        join_segments(&self.static_dir)
    }

    pub fn state_path(&self) -> PathBuf {
        join_segments(&self.state_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        join_segments(&self.output_dir)
    }

    /// Creates the save and artifact directories if they don't exist yet.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.state_path(), self.output_path()] {
            fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;
        }
        Ok(())
    }
}

fn join_segments(segments: &[String]) -> PathBuf {
    segments.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_keys_use_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"model": "gpt-4o-mini"}"#).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.static_path(), PathBuf::from("static"));
        assert_eq!(config.output_path(), PathBuf::from("runs"));
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn joins_path_segments() {
        let config: GameConfig =
            serde_json::from_str(r#"{"state_dir": ["data", "saves"]}"#).unwrap();
        assert_eq!(config.state_path(), Path::new("data").join("saves"));
    }

    #[test]
    fn load_rejects_empty_segment_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"output_dir": []}"#).unwrap();
        assert!(GameConfig::load(&path).is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = GameConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
