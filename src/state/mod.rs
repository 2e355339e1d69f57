// State management module
// Domain types for microagents plus host application state

pub mod agent_state;
pub mod app_state;
pub mod expansion;
pub mod microagent;

pub use agent_state::{AgentState, UnknownAgentState};
pub use app_state::{AppState, ConversationId, UiState};
pub use expansion::ExpansionState;
pub use microagent::{Microagent, TypeBadge};
