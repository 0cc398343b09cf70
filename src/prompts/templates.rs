/// Shown before the start menu when `prompts/start.txt` is absent
pub const START_DEFAULT: &str = r#"=== Campus Life ===
A semester of classes, clubs and new faces is about to start.

(1) New game
(2) Load a save"#;

/// First log entry of every new game when `prompts/opening.txt` is absent
pub const OPENING_DEFAULT: &str = "A new semester begins. You step onto campus with a fresh timetable, a full tank of energy and not a single friend yet.";

/// End-of-semester review prompt when `prompts/review_prompt.txt` is absent.
/// `{history}` is replaced with the most recent log entries.
pub const REVIEW_DEFAULT: &str = r#"Act as a campus life critic. Below is the log of one player's semester in a campus life game.

Write a game review and respond with JSON only, in exactly this format:

{"comment": "two or three sentences on how the semester went", "score": 0-100, "highlight": "the single best moment", "replay_tips": ["tip", "tip"]}

## Semester Log

{history}
"#;
