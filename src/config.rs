//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. Values that fail to parse fall back to the default.

use crate::i18n::Locale;
use crate::state::AgentState;
use std::env;
use std::fmt;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Conversation API configuration
    pub api: ApiConfig,
    /// Microagent query caching configuration
    pub query: QueryConfig,
    /// Initial UI state
    pub ui: UiConfig,
}

/// Conversation API configuration
///
/// `Debug` never prints the session key.
#[derive(Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the server hosting the conversation API
    pub base_url: String,
    /// Session key sent as `X-Session-API-Key`, if the server requires one
    pub session_api_key: Option<String>,
    /// Timeout for a single request (in seconds)
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field(
                "session_api_key",
                &self.session_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Query caching configuration
#[derive(Debug, Clone, PartialEq)]
pub struct QueryConfig {
    /// Age after which cached microagents are refetched on open (in seconds)
    pub stale_time_secs: u64,
    /// How long cached microagents survive while the modal is closed (in seconds)
    pub cache_time_secs: u64,
}

/// Initial UI state
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Conversation to open at startup
    pub conversation_id: Option<String>,
    /// Agent run-state to assume at startup
    pub agent_state: AgentState,
    /// Locale for modal strings
    pub locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:3000".to_string(),
                session_api_key: None,
                timeout_secs: 30,
            },
            query: QueryConfig {
                stale_time_secs: 5 * 60,
                cache_time_secs: 15 * 60,
            },
            ui: UiConfig {
                conversation_id: None,
                agent_state: AgentState::Loading,
                locale: Locale::En,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api: ApiConfig {
                base_url: non_empty_var("MICROAGENTS_API_URL")
                    .unwrap_or(defaults.api.base_url),
                session_api_key: non_empty_var("MICROAGENTS_SESSION_API_KEY"),
                timeout_secs: parsed_var("MICROAGENTS_REQUEST_TIMEOUT_SECS")
                    .unwrap_or(defaults.api.timeout_secs),
            },
            query: QueryConfig {
                stale_time_secs: parsed_var("MICROAGENTS_STALE_TIME_SECS")
                    .unwrap_or(defaults.query.stale_time_secs),
                cache_time_secs: parsed_var("MICROAGENTS_CACHE_TIME_SECS")
                    .unwrap_or(defaults.query.cache_time_secs),
            },
            ui: UiConfig {
                conversation_id: non_empty_var("MICROAGENTS_CONVERSATION_ID"),
                agent_state: parsed_var("MICROAGENTS_AGENT_STATE")
                    .unwrap_or(defaults.ui.agent_state),
                locale: non_empty_var("MICROAGENTS_LOCALE")
                    .map(|l| Locale::parse(&l))
                    .unwrap_or(defaults.ui.locale),
            },
        }
    }

    /// Stale time as a `Duration`
    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.query.stale_time_secs)
    }

    /// Cache lifetime as a `Duration`
    pub fn cache_time(&self) -> Duration {
        Duration::from_secs(self.query.cache_time_secs)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    non_empty_var(key).and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "MICROAGENTS_API_URL",
        "MICROAGENTS_SESSION_API_KEY",
        "MICROAGENTS_REQUEST_TIMEOUT_SECS",
        "MICROAGENTS_STALE_TIME_SECS",
        "MICROAGENTS_CACHE_TIME_SECS",
        "MICROAGENTS_CONVERSATION_ID",
        "MICROAGENTS_AGENT_STATE",
        "MICROAGENTS_LOCALE",
    ];

    fn clear_env() {
        for key in VARS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.stale_time(), Duration::from_secs(300));
        assert_eq!(config.cache_time(), Duration::from_secs(900));
        assert_eq!(config.api.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("MICROAGENTS_API_URL", "https://app.example.com");
        env::set_var("MICROAGENTS_SESSION_API_KEY", "secret");
        env::set_var("MICROAGENTS_REQUEST_TIMEOUT_SECS", "5");
        env::set_var("MICROAGENTS_STALE_TIME_SECS", "0");
        env::set_var("MICROAGENTS_CONVERSATION_ID", "abc123");
        env::set_var("MICROAGENTS_AGENT_STATE", "RUNNING");
        env::set_var("MICROAGENTS_LOCALE", "de-DE");

        let config = Config::from_env();
        clear_env();

        assert_eq!(config.api.base_url, "https://app.example.com");
        assert_eq!(config.api.session_api_key.as_deref(), Some("secret"));
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.query.stale_time_secs, 0);
        assert_eq!(config.query.cache_time_secs, 900);
        assert_eq!(config.ui.conversation_id.as_deref(), Some("abc123"));
        assert_eq!(config.ui.agent_state, AgentState::Running);
        assert_eq!(config.ui.locale, Locale::De);
    }

    #[test]
    #[serial]
    fn test_invalid_values_fall_back() {
        clear_env();
        env::set_var("MICROAGENTS_REQUEST_TIMEOUT_SECS", "soon");
        env::set_var("MICROAGENTS_AGENT_STATE", "sleeping");
        env::set_var("MICROAGENTS_CONVERSATION_ID", "   ");

        let config = Config::from_env();
        clear_env();

        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.ui.agent_state, AgentState::Loading);
        assert!(config.ui.conversation_id.is_none());
    }

    #[test]
    fn test_debug_redacts_session_key() {
        let mut config = Config::default();
        config.api.session_api_key = Some("top-secret-key".to_string());

        let printed = format!("{:?}", config);
        assert!(!printed.contains("top-secret-key"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("http://localhost:3000"));

        config.api.session_api_key = None;
        assert!(format!("{:?}", config).contains("session_api_key: None"));
    }
}
