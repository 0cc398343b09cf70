use crate::traits::{InteractionKind, ResponseClassifier};

/// Keyword rule for one interaction kind: `hit` if any keyword appears, `miss` otherwise
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub hit: u32,
    pub miss: u32,
}

impl KeywordRule {
    pub fn new(keywords: &[&str], hit: u32, miss: u32) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            hit,
            miss,
        }
    }

    fn score(&self, response: &str) -> u32 {
        if self.keywords.iter().any(|k| response.contains(k.as_str())) {
            self.hit
        } else {
            self.miss
        }
    }
}

/// Case-sensitive substring matching over the reply text.
///
/// This is a sentiment heuristic, not a semantic check: "can" also matches "cannot".
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    pub chat: KeywordRule,
    pub advice: KeywordRule,
    pub invite: KeywordRule,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self {
            chat: KeywordRule::new(&["together", "suggest", "can"], 3, 1),
            advice: KeywordRule::new(&["yes", "satisfied"], 4, 0),
            invite: KeywordRule::new(&["accept", "want to try", "okay", "can"], 5, 1),
        }
    }
}

impl ResponseClassifier for KeywordClassifier {
    fn friendship_delta(&self, kind: InteractionKind, response: &str) -> u32 {
        let rule = match kind {
            InteractionKind::Chat => &self.chat,
            InteractionKind::AskAdvice => &self.advice,
            InteractionKind::Invite => &self.invite,
        };
        rule.score(response)
    }
}
