//! Line-based text front end.
//!
//! Reads menu choices from any [`BufRead`] and writes to any [`Write`], turning
//! them into [`Command`]s for the [`GameEngine`] and printing the resulting events.
//! End of input is treated as "save and exit".

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::GameConfig;
use crate::content::ContentStore;
use crate::engine::{Command, EndReport, GameEngine, GameEvent, Interaction, Phase};
use crate::error::GameResult;
use crate::llm::LlmClient;
use crate::state::{list_saves, new_save_path};

/// Which save the session plays on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveChoice {
    New,
    Existing(PathBuf),
}

impl SaveChoice {
    /// Builds the engine for this choice using the configured directories and model.
    pub fn open(
        self,
        content: ContentStore,
        llm_client: Arc<dyn LlmClient>,
        config: &GameConfig,
    ) -> GameResult<GameEngine> {
        let engine = match self {
            SaveChoice::New => GameEngine::start_new(
                content,
                llm_client,
                new_save_path(&config.state_path()),
                config.output_path(),
            )?,
            SaveChoice::Existing(path) => {
                GameEngine::resume(content, llm_client, path, config.output_path())?
            }
        };
        Ok(engine
            .with_model(config.model.clone())
            .with_temperature(config.temperature))
    }
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `label` and reads one trimmed line. `None` at end of input.
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        if !label.is_empty() {
            write!(self.output, "{}", label)?;
            self.output.flush()?;
        }
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    /// Start menu: new game, or pick one of the saves in `state_dir`.
    pub fn choose_save(&mut self, start_text: &str, config: &GameConfig) -> Result<SaveChoice> {
        self.say(start_text)?;
        if self.ask("")?.as_deref() != Some("2") {
            return Ok(SaveChoice::New);
        }

        let saves = list_saves(&config.state_path())?;
        if saves.is_empty() {
            self.say("No saves found, starting a new game.")?;
            return Ok(SaveChoice::New);
        }

        self.say("Existing saves:")?;
        for (i, path) in saves.iter().enumerate() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.say(format!("({}) {}", i + 1, name))?;
        }

        let picked = self
            .ask("Pick a save number, or press Enter for a new game: ")?
            .and_then(|sel| sel.parse::<usize>().ok())
            .filter(|n| (1..=saves.len()).contains(n));
        match picked {
            Some(n) => {
                self.say("Save loaded.")?;
                Ok(SaveChoice::Existing(saves[n - 1].clone()))
            }
            None => Ok(SaveChoice::New),
        }
    }

    /// Runs the main menu until the player leaves or the semester ends.
    pub async fn run(&mut self, engine: &mut GameEngine) -> Result<()> {
        loop {
            if let Some(report) = engine.check_end_condition().await? {
                self.show_ending(&report)?;
                break;
            }
            match engine.phase() {
                Phase::Running => {}
                Phase::Exited => break,
                Phase::Ended => {
                    self.say("This semester is already over. Start a new game to play again.")?;
                    break;
                }
            }

            self.say("")?;
            self.say("Actions:")?;
            self.say("(1) Wander around campus (meet a random student)")?;
            self.say("(2) View your campus directory")?;
            self.say("(3) Spend time with someone you know")?;
            self.say("(4) Rest (recover energy)")?;
            self.say("(0) Save and quit")?;

            let command = match self.ask("Choose: ")?.as_deref() {
                Some("1") => Command::Explore,
                Some("2") => Command::Pedia,
                Some("3") => match self.pick_interaction(engine)? {
                    Some(command) => command,
                    None => continue,
                },
                Some("4") => Command::Rest,
                Some("0") | None => Command::SaveExit,
                Some(_) => {
                    self.say("Invalid input.")?;
                    continue;
                }
            };

            let pause_after = command == Command::Pedia;
            let events = engine.execute(command).await?;
            self.show_events(&events)?;
            if pause_after && !engine.roster().is_empty() {
                self.ask("Press Enter to continue...")?;
            }
        }
        Ok(())
    }

    /// Sub-menus for choosing a student and an interaction. `None` means the
    /// choice was abandoned.
    fn pick_interaction(&mut self, engine: &GameEngine) -> Result<Option<Command>> {
        let roster = engine.roster();
        if roster.is_empty() {
            self.say("You don't know anyone yet. Wander around campus to meet people first.")?;
            return Ok(None);
        }

        for (i, line) in roster.iter().enumerate() {
            self.say(format!("({}) {}", i + 1, line.name))?;
        }
        let picked = self
            .ask("Who do you want to spend time with? ")?
            .and_then(|sel| sel.parse::<usize>().ok())
            .filter(|n| (1..=roster.len()).contains(n));
        let Some(n) = picked else {
            self.say("Invalid choice.")?;
            return Ok(None);
        };
        let student_id = roster[n - 1].student_id.clone();

        self.say("(1) Chat (2) Ask for advice (3) Invite to a club or activity")?;
        let interaction = match self.ask("How? ")?.as_deref() {
            Some("1") => Interaction::Chat,
            Some("2") => {
                let question = self
                    .ask("What do you want to ask (at least 5 characters)? ")?
                    .unwrap_or_default();
                Interaction::AskAdvice { question }
            }
            Some("3") => {
                let activity = self
                    .ask("Which club or activity (at least 2 characters)? ")?
                    .unwrap_or_default();
                Interaction::Invite { activity }
            }
            _ => {
                self.say("Invalid input.")?;
                return Ok(None);
            }
        };

        Ok(Some(Command::Interact {
            student_id,
            interaction,
        }))
    }

    fn show_events(&mut self, events: &[GameEvent]) -> Result<()> {
        for event in events {
            match event {
                GameEvent::Encountered { text, .. }
                | GameEvent::Befriended { text, .. }
                | GameEvent::Rested { text, .. } => self.say(text)?,
                GameEvent::Roster(lines) if lines.is_empty() => {
                    self.say("Your directory is empty.")?
                }
                GameEvent::Roster(lines) => {
                    self.say("People you know:")?;
                    for (i, line) in lines.iter().enumerate() {
                        self.say(format!("({}) {} - friendship: {}", i + 1, line.name, line.friendship))?;
                    }
                }
                GameEvent::Replied { response, .. } => {
                    self.say("")?;
                    self.say(response)?;
                    self.say("")?;
                }
                GameEvent::Rejected { reason } => self.say(reason)?,
                GameEvent::Saved { .. } => self.say("Game saved. See you next time.")?,
                GameEvent::Ended(report) => self.show_ending(report)?,
            }
        }
        Ok(())
    }

    fn show_ending(&mut self, report: &EndReport) -> Result<()> {
        self.say("")?;
        self.say("=== Semester Review ===")?;
        self.say(serde_json::to_string_pretty(&report.review)?)?;
        self.say("")?;
        self.say(format!("Run record saved: {}", report.artifact_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::OfflineClient;
    use crate::prompts::PromptLoader;
    use crate::state::PlayerState;
    use crate::types::StudentProfile;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> GameConfig {
        let root = dir.path().to_string_lossy().into_owned();
        let config = GameConfig {
            state_dir: vec![root.clone(), "state".into()],
            output_dir: vec![root, "runs".into()],
            ..GameConfig::default()
        };
        config.ensure_dirs().unwrap();
        config
    }

    fn content() -> ContentStore {
        let ben = StudentProfile::new("ben", "Ben", "CS", "Robots", vec!["robots".into()]);
        ContentStore::from_parts(PromptLoader::default(), vec![ben])
    }

    #[test]
    fn choose_save_defaults_to_new_game() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let mut console = Console::new(Cursor::new("2\n"), Vec::new());

        assert_eq!(console.choose_save("Menu", &config).unwrap(), SaveChoice::New);
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("No saves found"));
    }

    #[test]
    fn choose_save_picks_existing_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let path = config.state_path().join("save_20240101_000000.json");
        PlayerState::new().save(&path).unwrap();

        let mut console = Console::new(Cursor::new("2\n1\n"), Vec::new());
        assert_eq!(
            console.choose_save("Menu", &config).unwrap(),
            SaveChoice::Existing(path)
        );
    }

    #[tokio::test]
    async fn interact_is_gated_until_someone_is_known() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let mut engine = SaveChoice::New
            .open(content(), Arc::new(OfflineClient), &config)
            .unwrap();

        let mut console = Console::new(Cursor::new("3\n9\n0\n"), Vec::new());
        console.run(&mut engine).await.unwrap();

        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("You don't know anyone yet"));
        assert!(out.contains("Invalid input."));
        assert!(out.contains("Game saved."));
        assert_eq!(engine.phase(), Phase::Exited);
    }

    #[tokio::test]
    async fn end_of_input_saves_and_exits() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let mut engine = SaveChoice::New
            .open(content(), Arc::new(OfflineClient), &config)
            .unwrap();

        let mut console = Console::new(Cursor::new("1\n"), Vec::new());
        console.run(&mut engine).await.unwrap();

        assert_eq!(engine.phase(), Phase::Exited);
        let saved = PlayerState::load(engine.save_path()).unwrap();
        assert!(saved.known_students.contains("ben"));
    }
}
