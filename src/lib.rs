//! # Campus Life
//!
//! A text-based campus life simulation. The player wanders around campus, meets
//! student NPCs loaded from content files and spends time with them; every
//! reply is written by a chat model. Befriend two students deeply enough and the
//! semester ends with a model-written review.
//!
//! ## Features
//!
//! - **Game Engine**: commands in, events out; persists after every change
//! - **Content Store**: prompt templates and student profiles from a static directory
//! - **Chat Gateway**: OpenAI-compatible client, plus a deterministic offline mode
//! - **Response Classifier**: pluggable scoring of replies into friendship
//! - **Review**: end-of-semester review with a graceful fallback and a run artifact
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use campus_life::{Command, ContentStore, GameEngine, llm::OfflineClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let content = ContentStore::load("static")?;
//! let mut engine = GameEngine::start_new(
//!     content,
//!     Arc::new(OfflineClient::new()),
//!     "state/save_demo.json",
//!     "runs",
//! )?;
//!
//! let events = engine.execute(Command::Explore).await?;
//! println!("{} things happened", events.len());
//! if let Some(report) = engine.check_end_condition().await? {
//!     println!("{}", report.review.comment);
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod console;
pub mod content;
pub mod engine;
pub mod error;
pub mod llm;
pub mod parser;
pub mod prompts;
pub mod review;
pub mod state;
pub mod traits;
pub mod types;

pub use classifier::KeywordClassifier;
pub use config::GameConfig;
pub use console::{Console, SaveChoice};
pub use content::ContentStore;
pub use engine::{Command, EndReport, GameEngine, GameEvent, Interaction, Phase, RosterLine};
pub use error::{ContentLoadError, GameError, SaveError};
pub use llm::{ChatMessage, ChatRequest, GatewayError, LlmClient, Role};
pub use review::{Review, ReviewOutcome, RunArtifact};
pub use state::PlayerState;
pub use traits::{InteractionKind, ResponseClassifier};
pub use types::{Attributes, KnownStudent, KnownStudents, StudentProfile};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
