//! End-of-semester review and the run artifact written when a game is won.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::parser;
use crate::state::PlayerState;
use crate::types::{Attributes, KnownStudents};

/// How many of the latest log entries are sent for review
pub const REVIEW_HISTORY_LEN: usize = 80;

/// Output budget for the review call
pub const REVIEW_MAX_TOKENS: u32 = 400;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub comment: String,
    pub score: i64,
    #[serde(default)]
    pub highlight: String,
    #[serde(default)]
    pub replay_tips: Vec<String>,
}

/// Whether the model produced a usable structured review
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    Parsed(Review),
    /// The raw reply, kept when it could not be parsed
    Degraded(String),
}

impl ReviewOutcome {
    pub fn parse(raw: &str) -> Self {
        match parser::extract_json::<Review>(raw) {
            Ok(review) => ReviewOutcome::Parsed(review),
            Err(e) => {
                log::warn!("Review reply was not valid JSON ({}), keeping raw text", e);
                ReviewOutcome::Degraded(raw.to_string())
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ReviewOutcome::Degraded(_))
    }

    /// The record to store; a degraded reply becomes a zero-score comment.
    pub fn review(&self) -> Review {
        match self {
            ReviewOutcome::Parsed(review) => review.clone(),
            ReviewOutcome::Degraded(raw) => Review {
                comment: raw.clone(),
                score: 0,
                highlight: String::new(),
                replay_tips: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactState {
    pub known_students: KnownStudents,
    pub attributes: Attributes,
}

/// Snapshot of a finished playthrough
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunArtifact {
    pub timestamp: String,
    pub state: ArtifactState,
    pub history: Vec<String>,
    pub review: Review,
}

impl RunArtifact {
    pub fn new(state: &PlayerState, review: Review) -> Self {
        Self {
            timestamp: chrono::Local::now().format("%Y%m%d_%H%M%S").to_string(),
            state: ArtifactState {
                known_students: state.known_students.clone(),
                attributes: state.attributes,
            },
            history: state.log.clone(),
            review,
        }
    }

    pub fn file_name(&self) -> String {
        format!("run_{}.json", self.timestamp)
    }

    /// Writes the artifact into `output_dir` and returns its path.
    pub fn write(&self, output_dir: &Path) -> std::io::Result<PathBuf> {
        let path = output_dir.join(self.file_name());
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(path)
    }
}
