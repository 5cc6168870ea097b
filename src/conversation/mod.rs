use serde::{Deserialize, Serialize};

pub mod format;
pub mod markup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Append-only conversation. The first turn is always the system prompt,
/// which is sent with every request but never displayed.
#[derive(Debug, Clone)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![ConversationTurn::new(Role::System, system_prompt)],
        }
    }

    /// Blank or whitespace-only text is rejected. Returns whether a turn
    /// was appended.
    pub fn append_user(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.turns.push(ConversationTurn::new(Role::User, text));
        true
    }

    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn::new(Role::Assistant, text));
    }

    /// Turns to display, without the system prompt.
    pub fn snapshot(&self) -> &[ConversationTurn] {
        &self.turns[1..]
    }

    /// Turns to send, system prompt first.
    pub fn to_payload(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }
}
