//! Session-scoped conversation log.
//!
//! The log is append-only: entries cannot be edited or removed once pushed,
//! and the log is never persisted.

use chrono::{DateTime, Local};
use serde_json::Value;

/// Who authored an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A review the user submitted.
    User,
    /// A verdict returned by the service.
    Bot,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "you"),
            Self::Bot => write!(f, "agent"),
        }
    }
}

/// One rendered turn in the conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    role: Role,
    text: String,
    attachment: Option<Value>,
    timestamp: DateTime<Local>,
}

impl Entry {
    /// Create a user entry.
    pub fn user(text: impl Into<String>, attachment: Option<Value>) -> Self {
        Self::new(Role::User, text.into(), attachment)
    }

    /// Create a bot entry.
    pub fn bot(text: impl Into<String>, attachment: Option<Value>) -> Self {
        Self::new(Role::Bot, text.into(), attachment)
    }

    fn new(role: Role, text: String, attachment: Option<Value>) -> Self {
        Self {
            role,
            text,
            attachment,
            timestamp: Local::now(),
        }
    }

    /// Author of the entry.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Display text. May contain newlines.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attached JSON payload, if any.
    pub fn attachment(&self) -> Option<&Value> {
        self.attachment.as_ref()
    }

    /// Attached payload pretty-printed with two-space indentation.
    pub fn attachment_pretty(&self) -> Option<String> {
        self.attachment
            .as_ref()
            .and_then(|v| serde_json::to_string_pretty(v).ok())
    }

    /// When the entry was appended.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

/// Ordered, append-only list of entries.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    entries: Vec<Entry>,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// All entries in order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the conversation has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count entries by role.
    pub fn count(&self, role: Role) -> usize {
        self.entries.iter().filter(|e| e.role == role).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_preserves_order() {
        let mut conversation = Conversation::new();
        assert!(conversation.is_empty());

        conversation.push(Entry::user("first", None));
        conversation.push(Entry::bot("second", None));
        conversation.push(Entry::user("third", None));

        let texts: Vec<&str> = conversation.entries().iter().map(Entry::text).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(conversation.count(Role::User), 2);
        assert_eq!(conversation.count(Role::Bot), 1);
        assert_eq!(conversation.last().map(Entry::role), Some(Role::User));
    }

    #[test]
    fn test_attachment_pretty_printed() {
        let entry = Entry::user("Input Review Object:", Some(json!({"a": 1})));
        assert_eq!(entry.attachment_pretty().unwrap(), "{\n  \"a\": 1\n}");
        assert!(Entry::bot("no payload", None).attachment_pretty().is_none());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "you");
        assert_eq!(Role::Bot.to_string(), "agent");
    }
}
