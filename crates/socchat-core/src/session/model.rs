//! Chat session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::ChatMessage;

/// A conversation between an analyst and the assistant.
///
/// The message list is append-only: there is no API to edit, reorder or
/// remove messages. In the running pipeline a session is owned by exactly
/// one `ChatSessionMutator`, which is the only writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    id: String,
    title: String,
    messages: Vec<ChatMessage>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// Creates an empty session with a fresh UUID.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title)
    }

    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Messages in chronological order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Appends one message.
    pub fn append(&mut self, message: ChatMessage) -> &Self {
        self.messages.push(message);
        self.touch();
        self
    }

    /// Appends a user message and its reply back to back.
    pub fn append_exchange(&mut self, user: ChatMessage, assistant: ChatMessage) -> &Self {
        self.messages.reserve(2);
        self.messages.push(user);
        self.messages.push(assistant);
        self.touch();
        self
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::message::{Citation, MessageRole};

    #[test]
    fn test_new_session_is_empty() {
        let session = ChatSession::new("Triage");
        assert!(session.is_empty());
        assert_eq!(session.title(), "Triage");
        assert!(!session.id().is_empty());
        assert_eq!(session.created_at(), session.updated_at());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut session = ChatSession::with_id("s-1", "Triage");
        session.append(ChatMessage::user("first"));
        session.append_exchange(ChatMessage::user("second"), ChatMessage::assistant("third"));

        let contents: Vec<&str> = session
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(session.last_message().unwrap().role, MessageRole::Assistant);
        assert!(session.updated_at() >= session.created_at());
    }

    #[test]
    fn test_message_ids_are_unique() {
        let mut session = ChatSession::new("Triage");
        session.append_exchange(ChatMessage::user("a"), ChatMessage::assistant("b"));
        let ids: Vec<&str> = session.messages().iter().map(|m| m.id.as_str()).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_citations_serialize_only_when_present() {
        let plain = serde_json::to_value(ChatMessage::assistant("ok")).unwrap();
        assert!(plain.get("citations").is_none());

        let cited = ChatMessage::assistant("see runbook")
            .with_citations(vec![Citation::new("doc-7", "Phishing runbook")]);
        let value = serde_json::to_value(&cited).unwrap();
        assert_eq!(value["citations"][0]["name"], "Phishing runbook");
        assert_eq!(value["role"], "assistant");
    }
}
