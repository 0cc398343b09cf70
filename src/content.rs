//! Read-only game content: prompt templates and the student roster.
//!
//! Layout under the static directory:
//!
//! ```text
//! static/
//!   prompts/<key>.txt
//!   students/<id>.json
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ContentLoadError;
use crate::prompts::loader::text_files;
use crate::prompts::PromptLoader;
use crate::types::StudentProfile;

#[derive(Debug, Clone)]
pub struct ContentStore {
    pub prompts: PromptLoader,
    students: BTreeMap<String, StudentProfile>,
}

impl ContentStore {
    pub fn load(static_dir: impl AsRef<Path>) -> Result<Self, ContentLoadError> {
        let static_dir = static_dir.as_ref();
        if !static_dir.is_dir() {
            return Err(ContentLoadError::MissingDirectory(static_dir.to_path_buf()));
        }

        let prompts = PromptLoader::load(static_dir.join("prompts"))?;
        let students = load_students(&static_dir.join("students"))?;
        log::debug!(
            "Loaded {} prompts and {} students from {:?}",
            prompts.len(),
            students.len(),
            static_dir
        );

        Ok(Self { prompts, students })
    }

    /// Builds a store from in-memory content. Profile ids are taken from the profiles.
    pub fn from_parts(prompts: PromptLoader, students: Vec<StudentProfile>) -> Self {
        let students = students.into_iter().map(|s| (s.id.clone(), s)).collect();
        Self { prompts, students }
    }

    pub fn student(&self, id: &str) -> Option<&StudentProfile> {
        self.students.get(id)
    }

    /// Every student, ordered by id
    pub fn roster(&self) -> Vec<&StudentProfile> {
        self.students.values().collect()
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }
}

fn load_students(dir: &Path) -> Result<BTreeMap<String, StudentProfile>, ContentLoadError> {
    let mut students = BTreeMap::new();

    for path in text_files(dir, "json")? {
        let Some(id) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        let content = fs::read_to_string(&path).map_err(|source| ContentLoadError::Io {
            path: path.clone(),
            source,
        })?;
        let mut profile: StudentProfile =
            serde_json::from_str(&content).map_err(|source| ContentLoadError::Malformed {
                path: path.clone(),
                source,
            })?;
        profile.id = id.clone();
        students.insert(id, profile);
    }

    if students.is_empty() {
        return Err(ContentLoadError::EmptyRoster(dir.to_path_buf()));
    }
    Ok(students)
}
