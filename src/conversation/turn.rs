//! Turn and conversation types
//!
//! A conversation is the append-only record of one agent run. It always
//! starts with the user's query, so it is never empty.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    ToolOutput,
}

/// One recorded step of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a tool output turn
    pub fn tool_output(content: impl Into<String>) -> Self {
        Self {
            role: Role::ToolOutput,
            content: content.into(),
        }
    }
}

/// Ordered turns of one agent run
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    id: String,
    /// Invariant: never empty
    turns: Vec<Turn>,
}

impl Conversation {
    /// Start a conversation from the user's query
    pub fn new(user_query: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            turns: vec![Turn::user(user_query)],
        }
    }

    /// Run identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The original query
    pub fn query(&self) -> &str {
        &self.turns[0].content
    }

    /// The most recent turn
    pub fn last(&self) -> &Turn {
        // Constructed with one turn and only ever appended to
        &self.turns[self.turns.len() - 1]
    }

    /// Append a turn
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns in order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false; kept alongside `len`
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
