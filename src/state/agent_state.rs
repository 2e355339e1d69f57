// Agent run-state
// Lifecycle phase of the agent runtime backing a conversation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle phase reported by the agent runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    /// Runtime is being provisioned
    #[default]
    Loading,
    /// Runtime is up but the agent has not been initialized yet
    Init,
    /// Agent is working on a task
    Running,
    /// Agent is waiting for the next user message
    AwaitingUserInput,
    /// Agent was paused by the user
    Paused,
    /// Agent was stopped
    Stopped,
    /// Agent finished its task
    Finished,
    /// Agent rejected the task
    Rejected,
    /// Agent hit an error
    Error,
    /// Agent is backing off after an LLM rate limit
    RateLimited,
    /// Agent is waiting for the user to confirm an action
    AwaitingUserConfirmation,
    /// User confirmed the pending action
    UserConfirmed,
    /// User rejected the pending action
    UserRejected,
}

impl AgentState {
    /// Every state, in lifecycle order
    pub const ALL: [AgentState; 13] = [
        AgentState::Loading,
        AgentState::Init,
        AgentState::Running,
        AgentState::AwaitingUserInput,
        AgentState::Paused,
        AgentState::Stopped,
        AgentState::Finished,
        AgentState::Rejected,
        AgentState::Error,
        AgentState::RateLimited,
        AgentState::AwaitingUserConfirmation,
        AgentState::UserConfirmed,
        AgentState::UserRejected,
    ];

    /// Whether the runtime has come up far enough to answer queries.
    /// Only `Loading` and `Init` count as not ready.
    pub fn is_ready(self) -> bool {
        !matches!(self, AgentState::Loading | AgentState::Init)
    }

    /// Wire name of the state (snake_case)
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Loading => "loading",
            AgentState::Init => "init",
            AgentState::Running => "running",
            AgentState::AwaitingUserInput => "awaiting_user_input",
            AgentState::Paused => "paused",
            AgentState::Stopped => "stopped",
            AgentState::Finished => "finished",
            AgentState::Rejected => "rejected",
            AgentState::Error => "error",
            AgentState::RateLimited => "rate_limited",
            AgentState::AwaitingUserConfirmation => "awaiting_user_confirmation",
            AgentState::UserConfirmed => "user_confirmed",
            AgentState::UserRejected => "user_rejected",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known agent state
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown agent state: {0}")]
pub struct UnknownAgentState(pub String);

impl FromStr for AgentState {
    type Err = UnknownAgentState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        AgentState::ALL
            .into_iter()
            .find(|state| state.as_str() == normalized)
            .ok_or_else(|| UnknownAgentState(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_states() {
        assert!(!AgentState::Loading.is_ready());
        assert!(!AgentState::Init.is_ready());
    }

    #[test]
    fn test_every_other_state_is_ready() {
        let ready: Vec<_> = AgentState::ALL
            .into_iter()
            .filter(|s| s.is_ready())
            .collect();
        assert_eq!(ready.len(), AgentState::ALL.len() - 2);
        assert!(ready.contains(&AgentState::Running));
        assert!(ready.contains(&AgentState::Error));
        assert!(ready.contains(&AgentState::Stopped));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("RUNNING".parse::<AgentState>(), Ok(AgentState::Running));
        assert_eq!(
            " awaiting-user-input ".parse::<AgentState>(),
            Ok(AgentState::AwaitingUserInput)
        );
        assert!("sleeping".parse::<AgentState>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&AgentState::RateLimited).unwrap();
        assert_eq!(json, "\"rate_limited\"");
        let state: AgentState = serde_json::from_str("\"init\"").unwrap();
        assert_eq!(state, AgentState::Init);
    }

    #[test]
    fn test_default_is_loading() {
        assert_eq!(AgentState::default(), AgentState::Loading);
    }
}
