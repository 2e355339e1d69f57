// Application state management
// Holds the active conversation, the agent run-state and UI flags

use super::AgentState;

/// Identifier of a conversation on the server
pub type ConversationId = String;

/// Main application state
/// Owned by the host window; the microagents modal only reads from it
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Conversation whose microagents are shown, if any
    pub conversation_id: Option<ConversationId>,
    /// Current run-state of the agent behind the conversation
    pub agent_state: AgentState,
    /// UI state preferences
    pub ui_state: UiState,
}

/// UI-specific state
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether the microagents modal is open
    pub microagents_open: bool,
    /// Text currently typed into the conversation id field
    pub conversation_input: String,
}

impl AppState {
    /// Create application state for an optional conversation
    pub fn new(conversation_id: Option<ConversationId>, agent_state: AgentState) -> Self {
        let mut state = Self {
            agent_state,
            ..Self::default()
        };
        if let Some(id) = conversation_id {
            state.set_conversation_id(&id);
        }
        state
    }

    /// Switch to another conversation
    /// Blank input clears the conversation. Returns true if the id changed.
    pub fn set_conversation_id(&mut self, id: &str) -> bool {
        let trimmed = id.trim();
        let next = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self.ui_state.conversation_input = trimmed.to_string();
        if next == self.conversation_id {
            return false;
        }
        self.conversation_id = next;
        true
    }

    /// Update the agent run-state
    /// Returns true if the state changed
    pub fn set_agent_state(&mut self, agent_state: AgentState) -> bool {
        if self.agent_state == agent_state {
            false
        } else {
            self.agent_state = agent_state;
            true
        }
    }

    /// Open the microagents modal
    pub fn open_microagents(&mut self) {
        self.ui_state.microagents_open = true;
    }

    /// Close the microagents modal
    pub fn close_microagents(&mut self) {
        self.ui_state.microagents_open = false;
    }
}
