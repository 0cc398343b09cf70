use crate::types::StudentProfile;

/// Placeholder in the review template that receives the semester log
pub const HISTORY_PLACEHOLDER: &str = "{history}";

/// Builds the role-play prompts sent to the chat model
pub struct PromptBuilder;

impl PromptBuilder {
    /// Casual conversation about the student's own topics
    pub fn chat(student: &StudentProfile) -> String {
        format!(
            "You are a game NPC playing {} ({}). The player wants to chat with you about {}. \
             Write a natural reply of 2-4 sentences, and finish with one short suggestion \
             that would bring the two of you closer.",
            student.name,
            student.major,
            student.topics.join(", ")
        )
    }

    pub fn advice(student: &StudentProfile, question: &str) -> String {
        format!(
            "You are {} ({}). A student asks for advice. Briefly and clearly answer the \
             student's question: \"{}\". Reply in 2-4 sentences, then add a final line \
             rating whether the answer is satisfying (yes/no).",
            student.name, student.major, question
        )
    }

    pub fn invite(student: &StudentProfile, activity: &str) -> String {
        format!(
            "You are {}. Someone invited you to join the \"{}\" activity. Write 1) your \
             reason for accepting or declining (one or two sentences) 2) one line that \
             would bring the two of you closer.",
            student.name, activity
        )
    }

    /// Fills the review template with the given log entries, one per line.
    pub fn review(template: &str, history: &[String]) -> String {
        template.replace(HISTORY_PLACEHOLDER, &history.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ben() -> StudentProfile {
        StudentProfile::new(
            "ben",
            "Ben",
            "Computer Science",
            "Builds robots",
            vec!["robots".into(), "game jams".into()],
        )
    }

    #[test]
    fn chat_prompt_lists_topics() {
        let prompt = PromptBuilder::chat(&ben());
        assert!(prompt.contains("Ben (Computer Science)"));
        assert!(prompt.contains("robots, game jams"));
    }

    #[test]
    fn advice_and_invite_embed_player_text() {
        assert!(PromptBuilder::advice(&ben(), "How do I learn Rust?").contains("\"How do I learn Rust?\""));
        assert!(PromptBuilder::invite(&ben(), "chess club").contains("\"chess club\""));
    }

    #[test]
    fn review_substitutes_history() {
        let history = vec!["one".to_string(), "two".to_string()];
        let prompt = PromptBuilder::review("Log:\n{history}\nEnd", &history);
        assert_eq!(prompt, "Log:\none\ntwo\nEnd");
    }
}
