use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::classifier::KeywordClassifier;
use crate::config::DEFAULT_MODEL;
use crate::content::ContentStore;
use crate::error::{GameError, GameResult};
use crate::llm::{ChatRequest, LlmClient, DEFAULT_TEMPERATURE};
use crate::prompts::PromptBuilder;
use crate::review::{Review, ReviewOutcome, RunArtifact, REVIEW_HISTORY_LEN, REVIEW_MAX_TOKENS};
use crate::state::PlayerState;
use crate::traits::{InteractionKind, ResponseClassifier};
use crate::types::StudentProfile;

/// Friendship a student needs to count towards the ending
pub const FRIENDSHIP_GOAL: u32 = 12;

/// How many students must reach [`FRIENDSHIP_GOAL`]
pub const FRIENDS_NEEDED: usize = 2;

pub const REST_ENERGY: u32 = 5;

pub const MIN_QUESTION_CHARS: usize = 5;
pub const MIN_ACTIVITY_CHARS: usize = 2;

const CHAT_MAX_TOKENS: u32 = 200;
const ADVICE_MAX_TOKENS: u32 = 250;
const INVITE_MAX_TOKENS: u32 = 200;

/// An interaction with its player-supplied text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Chat,
    AskAdvice { question: String },
    Invite { activity: String },
}

impl Interaction {
    pub fn kind(&self) -> InteractionKind {
        match self {
            Interaction::Chat => InteractionKind::Chat,
            Interaction::AskAdvice { .. } => InteractionKind::AskAdvice,
            Interaction::Invite { .. } => InteractionKind::Invite,
        }
    }
}

/// A player action, as picked from the main menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Explore,
    Pedia,
    Interact {
        student_id: String,
        interaction: Interaction,
    },
    Rest,
    SaveExit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Saved and left; terminal
    Exited,
    /// The review has been written; terminal
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLine {
    pub student_id: String,
    pub name: String,
    pub friendship: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndReport {
    pub outcome: ReviewOutcome,
    pub review: Review,
    pub artifact_path: PathBuf,
}

/// What happened as the result of a command, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Encountered {
        student_id: String,
        text: String,
    },
    Befriended {
        student_id: String,
        text: String,
    },
    Roster(Vec<RosterLine>),
    Replied {
        student_id: String,
        name: String,
        kind: InteractionKind,
        response: String,
        delta: u32,
        friendship: u32,
    },
    /// Player input was invalid; nothing changed
    Rejected {
        reason: String,
    },
    Rested {
        energy: u32,
        text: String,
    },
    Saved {
        path: PathBuf,
    },
    Ended(EndReport),
}

/// Drives one playthrough: applies commands to the player state and persists after every change
pub struct GameEngine {
    content: ContentStore,
    llm_client: Arc<dyn LlmClient>,
    classifier: Box<dyn ResponseClassifier>,
    state: PlayerState,
    save_path: PathBuf,
    output_dir: PathBuf,
    model: String,
    temperature: f32,
    rng: StdRng,
    phase: Phase,
}

impl GameEngine {
    /// Wraps an existing state. A state that has already ended starts in [`Phase::Ended`].
    pub fn new(
        content: ContentStore,
        llm_client: Arc<dyn LlmClient>,
        state: PlayerState,
        save_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        let phase = if state.ended { Phase::Ended } else { Phase::Running };
        Self {
            content,
            llm_client,
            classifier: Box::new(KeywordClassifier::default()),
            state,
            save_path: save_path.into(),
            output_dir: output_dir.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            rng: StdRng::from_entropy(),
            phase,
        }
    }

    /// Starts a new game, writing the first save immediately.
    pub fn start_new(
        content: ContentStore,
        llm_client: Arc<dyn LlmClient>,
        save_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> GameResult<Self> {
        let state = PlayerState::with_opening(content.prompts.opening());
        let engine = Self::new(content, llm_client, state, save_path, output_dir);
        engine.persist()?;
        log::info!("New game saved to {:?}", engine.save_path);
        Ok(engine)
    }

    /// Continues from an existing save file.
    pub fn resume(
        content: ContentStore,
        llm_client: Arc<dyn LlmClient>,
        save_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> GameResult<Self> {
        let save_path = save_path.into();
        let state = PlayerState::load(&save_path)?;
        log::info!(
            "Resumed {:?} with {} known students",
            save_path,
            state.known_students.len()
        );
        Ok(Self::new(content, llm_client, state, save_path, output_dir))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_classifier(mut self, classifier: impl ResponseClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase != Phase::Running
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Known students in discovery order, for picking an interaction target
    pub fn roster(&self) -> Vec<RosterLine> {
        self.state
            .known_students
            .iter()
            .map(|(id, entry)| RosterLine {
                student_id: id.to_string(),
                name: entry.info.name.clone(),
                friendship: entry.friendship,
            })
            .collect()
    }

    fn goal_reached(&self) -> bool {
        !self.state.ended && self.state.known_students.count_at_least(FRIENDSHIP_GOAL) >= FRIENDS_NEEDED
    }

    /// Runs the end sequence if the win condition holds. Call once per turn,
    /// before asking for the next command.
    pub async fn check_end_condition(&mut self) -> GameResult<Option<EndReport>> {
        if self.phase != Phase::Running || !self.goal_reached() {
            return Ok(None);
        }
        log::info!("Friendship goal reached, generating the semester review");
        let report = self.end_sequence().await?;
        Ok(Some(report))
    }

    /// Applies one command. Fails with [`GameError::Finished`] once the game is over.
    pub async fn execute(&mut self, command: Command) -> GameResult<Vec<GameEvent>> {
        if self.is_finished() {
            return Err(GameError::Finished);
        }

        match command {
            Command::Explore => self.explore(),
            Command::Pedia => Ok(vec![GameEvent::Roster(self.roster())]),
            Command::Interact {
                student_id,
                interaction,
            } => self.interact(&student_id, interaction).await,
            Command::Rest => self.rest(),
            Command::SaveExit => self.save_exit(),
        }
    }

    fn explore(&mut self) -> GameResult<Vec<GameEvent>> {
        let roster = self.content.roster();
        let Some(student) = roster.choose(&mut self.rng).map(|s| (*s).clone()) else {
            return Ok(vec![GameEvent::Rejected {
                reason: "Nobody is around campus right now.".to_string(),
            }]);
        };

        let mut events = Vec::new();
        let text = format!(
            "You run into {} ({}) at the student cafeteria. Bio: {}",
            student.name, student.major, student.bio
        );
        self.state.record(text.clone());
        events.push(GameEvent::Encountered {
            student_id: student.id.clone(),
            text,
        });

        if self.state.known_students.meet(&student) {
            log::info!("Met {} for the first time", student.id);
            let text = format!(
                "You got to know {}; they have been added to your campus directory.",
                student.name
            );
            self.state.record(text.clone());
            events.push(GameEvent::Befriended {
                student_id: student.id.clone(),
                text,
            });
        }

        self.persist()?;
        Ok(events)
    }

    async fn interact(
        &mut self,
        student_id: &str,
        interaction: Interaction,
    ) -> GameResult<Vec<GameEvent>> {
        let student = self
            .state
            .known_students
            .get(student_id)
            .map(|entry| entry.info.clone())
            .ok_or_else(|| GameError::UnknownStudent(student_id.to_string()))?;

        let kind = interaction.kind();
        let (prompt, max_tokens) = match build_prompt(&student, &interaction) {
            Ok(built) => built,
            Err(reason) => return Ok(vec![GameEvent::Rejected { reason }]),
        };

        let request = ChatRequest::single(&self.model, prompt, max_tokens)
            .with_temperature(self.temperature);
        let response = self.llm_client.chat(&request).await?;

        let delta = self.classifier.friendship_delta(kind, &response);
        let entry = match &interaction {
            Interaction::Chat => format!("Hung out with {}: {}", student.name, response),
            Interaction::AskAdvice { question } => format!(
                "Asked {} for advice: {} Reply: {}",
                student.name,
                question.trim(),
                response
            ),
            Interaction::Invite { activity } => format!(
                "Invited {} to {}: {}",
                student.name,
                activity.trim(),
                response
            ),
        };
        self.state.record(entry);

        let friendship = match self.state.known_students.get_mut(student_id) {
            Some(known) => {
                known.friendship = known.friendship.saturating_add(delta);
                known.friendship
            }
            None => return Err(GameError::UnknownStudent(student_id.to_string())),
        };
        log::info!(
            "{} with {}: +{} friendship (now {})",
            kind,
            student_id,
            delta,
            friendship
        );

        self.persist()?;
        Ok(vec![GameEvent::Replied {
            student_id: student_id.to_string(),
            name: student.name,
            kind,
            response,
            delta,
            friendship,
        }])
    }

    fn rest(&mut self) -> GameResult<Vec<GameEvent>> {
        let energy = self.state.attributes.restore_energy(REST_ENERGY);
        let text = format!("You take a break. Energy +{}.", REST_ENERGY);
        self.state.record(text.clone());
        self.persist()?;
        Ok(vec![GameEvent::Rested { energy, text }])
    }

    fn save_exit(&mut self) -> GameResult<Vec<GameEvent>> {
        self.persist()?;
        self.phase = Phase::Exited;
        Ok(vec![GameEvent::Saved {
            path: self.save_path.clone(),
        }])
    }

    async fn end_sequence(&mut self) -> GameResult<EndReport> {
        let prompt = PromptBuilder::review(
            self.content.prompts.review(),
            self.state.recent_log(REVIEW_HISTORY_LEN),
        );
        let request = ChatRequest::single(&self.model, prompt, REVIEW_MAX_TOKENS)
            .with_temperature(self.temperature);
        let raw = self.llm_client.chat(&request).await?;

        let outcome = ReviewOutcome::parse(&raw);
        let review = outcome.review();
        let artifact = RunArtifact::new(&self.state, review.clone());
        let artifact_path = artifact
            .write(&self.output_dir)
            .map_err(|source| GameError::Artifact {
                path: self.output_dir.join(artifact.file_name()),
                source,
            })?;
        log::info!("Run artifact written to {:?}", artifact_path);

        self.state.ended = true;
        self.phase = Phase::Ended;
        self.persist()?;

        Ok(EndReport {
            outcome,
            review,
            artifact_path,
        })
    }

    fn persist(&self) -> GameResult<()> {
        self.state.save(&self.save_path)?;
        Ok(())
    }
}

/// Validates player text and builds the prompt with its output budget.
fn build_prompt(student: &StudentProfile, interaction: &Interaction) -> Result<(String, u32), String> {
    match interaction {
        Interaction::Chat => Ok((PromptBuilder::chat(student), CHAT_MAX_TOKENS)),
        Interaction::AskAdvice { question } => {
            let question = question.trim();
            if question.chars().count() < MIN_QUESTION_CHARS {
                return Err(format!(
                    "That question is too short (at least {} characters).",
                    MIN_QUESTION_CHARS
                ));
            }
            Ok((PromptBuilder::advice(student, question), ADVICE_MAX_TOKENS))
        }
        Interaction::Invite { activity } => {
            let activity = activity.trim();
            if activity.chars().count() < MIN_ACTIVITY_CHARS {
                return Err(format!(
                    "That's too short (at least {} characters).",
                    MIN_ACTIVITY_CHARS
                ));
            }
            Ok((PromptBuilder::invite(student, activity), INVITE_MAX_TOKENS))
        }
    }
}
