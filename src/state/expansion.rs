// Expand/collapse state for microagent rows

use std::collections::HashMap;

/// Per-row expansion flags keyed by microagent name.
/// Absent keys read as collapsed. Keys left over from an earlier fetch are
/// kept; the map lives only as long as the modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashMap<String, bool>,
}

impl ExpansionState {
    /// Create an empty state (everything collapsed)
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the row for `name` is expanded
    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded.get(name).copied().unwrap_or(false)
    }

    /// Flip the flag for `name`, leaving every other entry untouched.
    /// Returns the new value.
    pub fn toggle(&mut self, name: &str) -> bool {
        let entry = self.expanded.entry(name.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Number of rows currently expanded
    pub fn expanded_count(&self) -> usize {
        self.expanded.values().filter(|v| **v).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_collapsed() {
        let state = ExpansionState::new();
        assert!(!state.is_expanded("anything"));
        assert_eq!(state.expanded_count(), 0);
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut state = ExpansionState::new();
        assert!(state.toggle("a"));
        assert!(state.is_expanded("a"));
        assert!(!state.toggle("a"));
        assert!(!state.is_expanded("a"));
    }

    #[test]
    fn test_toggle_is_isolated() {
        let mut state = ExpansionState::new();
        state.toggle("b");
        state.toggle("a");
        assert!(state.is_expanded("b"));
        state.toggle("a");
        assert!(state.is_expanded("b"));
        assert!(!state.is_expanded("a"));
        assert_eq!(state.expanded_count(), 1);
    }

    #[test]
    fn test_unusual_names() {
        let mut state = ExpansionState::new();
        state.toggle("");
        state.toggle("name with spaces/and:punct");
        assert!(state.is_expanded(""));
        assert!(state.is_expanded("name with spaces/and:punct"));
    }
}
