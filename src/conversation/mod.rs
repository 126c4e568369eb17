//! Conversation state for a single agent run

mod turn;

pub use turn::{Conversation, Role, Turn};
