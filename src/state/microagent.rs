// Microagent model
// Named configuration unit loaded into a conversation

use serde::{Deserialize, Deserializer, Serialize};

/// Wire value of `type` for repository microagents
pub const REPO_TYPE: &str = "repo";

/// A microagent as returned by the conversation API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Microagent {
    /// Unique name, also used as the expansion key
    pub name: String,
    /// Microagent type ("repo", "knowledge", ...)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Keywords that activate the microagent, in declaration order
    #[serde(default, deserialize_with = "null_as_default")]
    pub triggers: Vec<String>,
    /// Markdown body of the microagent
    #[serde(default)]
    pub content: Option<String>,
}

/// Badge shown next to a microagent name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeBadge {
    /// Loaded from the repository
    Repository,
    /// Anything else
    Knowledge,
}

impl TypeBadge {
    /// Display label. Not translated.
    pub fn label(self) -> &'static str {
        match self {
            TypeBadge::Repository => "Repository",
            TypeBadge::Knowledge => "Knowledge",
        }
    }
}

impl Microagent {
    /// Create a microagent with no triggers and no content
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            triggers: Vec::new(),
            content: None,
        }
    }

    /// Builder-style trigger list
    pub fn with_triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers = triggers.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Whether this is a repository microagent
    pub fn is_repository(&self) -> bool {
        self.kind == REPO_TYPE
    }

    /// Badge for the row header
    pub fn badge(&self) -> TypeBadge {
        if self.is_repository() {
            TypeBadge::Repository
        } else {
            TypeBadge::Knowledge
        }
    }

    /// Content to display, `None` when absent or empty
    pub fn display_content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

/// Decode `null` the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_for_repo() {
        let agent = Microagent::new("a", "repo");
        assert_eq!(agent.badge(), TypeBadge::Repository);
        assert_eq!(agent.badge().label(), "Repository");
    }

    #[test]
    fn test_badge_for_other_types() {
        for kind in ["knowledge", "task", ""] {
            let agent = Microagent::new("a", kind);
            assert_eq!(agent.badge(), TypeBadge::Knowledge, "type {kind:?}");
        }
    }

    #[test]
    fn test_deserialize_full() {
        let json = r#"{"name":"github","type":"knowledge","triggers":["git","github"],"content":"Use the API"}"#;
        let agent: Microagent = serde_json::from_str(json).unwrap();
        assert_eq!(agent.name, "github");
        assert_eq!(agent.kind, "knowledge");
        assert_eq!(agent.triggers, vec!["git", "github"]);
        assert_eq!(agent.content.as_deref(), Some("Use the API"));
    }

    #[test]
    fn test_deserialize_null_and_missing_fields() {
        let agent: Microagent =
            serde_json::from_str(r#"{"name":"repo_rules","triggers":null,"content":null}"#)
                .unwrap();
        assert!(agent.triggers.is_empty());
        assert!(agent.content.is_none());
        assert_eq!(agent.kind, "");

        let agent: Microagent = serde_json::from_str(r#"{"name":"bare"}"#).unwrap();
        assert!(agent.triggers.is_empty());
    }

    #[test]
    fn test_display_content_treats_empty_as_absent() {
        assert_eq!(Microagent::new("a", "repo").display_content(), None);
        assert_eq!(
            Microagent::new("a", "repo").with_content("").display_content(),
            None
        );
        assert_eq!(
            Microagent::new("a", "repo")
                .with_content("  keep  ")
                .display_content(),
            Some("  keep  ")
        );
    }
}
