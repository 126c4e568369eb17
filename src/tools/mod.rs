//! Tool system for the agent
//!
//! This module provides the Tool trait and ToolRegistry for managing
//! tools that the agent can use.

mod registry;
pub mod simulated_search;
mod tool;
pub mod web_search;

pub use registry::ToolRegistry;
pub use simulated_search::SimulatedWebSearchTool;
pub use tool::{Tool, ToolArgs, ToolError};
pub use web_search::SerpApiSearchTool;
