//! Reasoners: the model side of the agent loop

pub mod gemini;
pub mod provider;
pub mod simulated;

pub use gemini::GeminiProvider;
pub use provider::Reasoner;
pub use simulated::SimulatedReasoner;
