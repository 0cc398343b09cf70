use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::templates::{OPENING_DEFAULT, REVIEW_DEFAULT, START_DEFAULT};
use crate::error::ContentLoadError;

pub const START_KEY: &str = "start";
pub const OPENING_KEY: &str = "opening";
pub const REVIEW_KEY: &str = "review_prompt";

/// Prompt templates keyed by file stem, loaded from `<static_dir>/prompts`
#[derive(Debug, Clone, Default)]
pub struct PromptLoader {
    templates: HashMap<String, String>,
}

impl PromptLoader {
    /// Reads every `*.txt` file under `prompts_dir`.
    pub fn load(prompts_dir: impl AsRef<Path>) -> Result<Self, ContentLoadError> {
        let prompts_dir = prompts_dir.as_ref();
        let mut templates = HashMap::new();

        for path in text_files(prompts_dir, "txt")? {
            let Some(key) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let text = fs::read_to_string(&path).map_err(|source| ContentLoadError::Io {
                path: path.clone(),
                source,
            })?;
            log::debug!("Loaded prompt '{}' from {:?}", key, path);
            templates.insert(key, text.trim_end().to_string());
        }

        Ok(Self { templates })
    }

    pub fn from_map(templates: HashMap<String, String>) -> Self {
        Self { templates }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn start(&self) -> &str {
        self.get_or_default(START_KEY, START_DEFAULT)
    }

    pub fn opening(&self) -> &str {
        self.get_or_default(OPENING_KEY, OPENING_DEFAULT)
    }

    pub fn review(&self) -> &str {
        self.get_or_default(REVIEW_KEY, REVIEW_DEFAULT)
    }

    fn get_or_default<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.get(key) {
            Some(text) => text,
            None => {
                log::debug!("Using default '{}' prompt", key);
                default
            }
        }
    }
}

/// Files in `dir` with the given extension, sorted by path.
pub(crate) fn text_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ContentLoadError> {
    if !dir.is_dir() {
        return Err(ContentLoadError::MissingDirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| ContentLoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ContentLoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
