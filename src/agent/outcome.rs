//! Result of one agent run

use std::fmt;

use crate::conversation::Conversation;

/// Why a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The model answered in prose
    DirectAnswer,
    /// The model asked for an empty or unregistered tool
    InvalidToolCall,
    /// The requested tool failed; carries the error text
    ToolFailed(String),
    /// The reasoner could not be reached; carries the error text
    ReasonerFailed(String),
    /// Every round invoked a tool and the budget ran out
    IterationsExhausted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::DirectAnswer => write!(f, "direct answer"),
            StopReason::InvalidToolCall => write!(f, "invalid tool call"),
            StopReason::ToolFailed(e) => write!(f, "tool failed: {}", e),
            StopReason::ReasonerFailed(e) => write!(f, "reasoner failed: {}", e),
            StopReason::IterationsExhausted => write!(f, "max iterations reached"),
        }
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    /// The text handed back to the caller
    pub answer: String,
    pub stop: StopReason,
    /// Number of reasoner calls made
    pub reasoner_calls: usize,
    /// Number of tool invocations attempted
    pub tool_invocations: usize,
    /// Every turn recorded during the run
    pub conversation: Conversation,
}

impl AgentOutcome {
    /// True only when the model itself produced the answer
    ///
    /// On [`StopReason::IterationsExhausted`] the answer is the last re-prompt
    /// text, which is a best-effort fallback and not an answer.
    pub fn is_final_answer(&self) -> bool {
        self.stop == StopReason::DirectAnswer
    }
}
