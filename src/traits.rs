use serde::{Deserialize, Serialize};
use std::fmt;

/// The three ways the player can spend time with a known student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Chat,
    AskAdvice,
    Invite,
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionKind::Chat => f.write_str("chat"),
            InteractionKind::AskAdvice => f.write_str("ask for advice"),
            InteractionKind::Invite => f.write_str("invite"),
        }
    }
}

/// Turns a model reply into a friendship gain.
///
/// Implementations must never return a negative delta; friendship only grows.
pub trait ResponseClassifier: Send + Sync {
    fn friendship_delta(&self, kind: InteractionKind, response: &str) -> u32;
}
