//! Deterministic stand-in for the chat model.
//!
//! Replies depend only on the text of the last message, so a whole
//! playthrough can run without network access and tests can rely on exact output.

use async_trait::async_trait;

use super::{ChatRequest, GatewayError, LlmClient};

pub const CHAT_REPLY: &str = "(offline reply) So glad we met! We can check out a club together or swap notes on our projects. Suggestion: join a club activity together.";

pub const ADVICE_REPLY: &str = "(offline answer) Start from the fundamentals and build up step by step, then practise a lot. Was the answer satisfying: yes";

pub const INVITE_REPLY: &str = "(offline reply) Sounds interesting, I want to try it, we can work out a time. Accept";

pub const FALLBACK_REPLY: &str = "(offline reply) I hear you, let's keep going.";

const CHAT_TRIGGERS: &[&str] = &["chat", "talk"];
const ADVICE_TRIGGERS: &[&str] = &["answer the student's question", "asks for advice"];
const INVITE_TRIGGERS: &[&str] = &["invited you to join", "invitation"];
const REVIEW_TRIGGERS: &[&str] = &["campus life critic", "game review"];

/// The review JSON returned for end-of-game prompts
pub fn review_reply() -> String {
    serde_json::json!({
        "comment": "Offline review: an active semester full of empathy, ending with two close friendships. Pacing and feedback felt good.",
        "score": 88,
        "highlight": "Working on a project together with a new friend stood out the most.",
        "replay_tips": [
            "Try more kinds of interaction (advice, invitations, activities).",
            "Focus on one student over several interactions to unlock special moments."
        ]
    })
    .to_string()
}

/// Offline responder keyed on substrings of the prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineClient;

impl OfflineClient {
    pub fn new() -> Self {
        Self
    }

    /// Categories are tested in order; the first match wins.
    pub fn respond(prompt: &str) -> String {
        let hit = |triggers: &[&str]| triggers.iter().any(|t| prompt.contains(t));

        if hit(CHAT_TRIGGERS) {
            CHAT_REPLY.to_string()
        } else if hit(ADVICE_TRIGGERS) {
            ADVICE_REPLY.to_string()
        } else if hit(INVITE_TRIGGERS) {
            INVITE_REPLY.to_string()
        } else if hit(REVIEW_TRIGGERS) {
            review_reply()
        } else {
            FALLBACK_REPLY.to_string()
        }
    }
}

#[async_trait]
impl LlmClient for OfflineClient {
    async fn chat(&self, request: &ChatRequest) -> Result<String, GatewayError> {
        Ok(Self::respond(request.last_content()))
    }
}
