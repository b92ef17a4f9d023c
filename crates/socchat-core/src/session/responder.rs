//! Conversational responder seam.
//!
//! Free-text questions bypass enrichment and are answered by a responder.
//! The real responder (an LLM, a knowledge-base search) lives outside this
//! workspace; the mutator only needs something that turns a prompt into an
//! assistant message.

use async_trait::async_trait;

use super::message::{ChatMessage, Citation};
use super::model::ChatSession;
use crate::error::Result;

#[async_trait]
pub trait ConversationalResponder: Send + Sync {
    /// Produces the assistant reply to `prompt`.
    ///
    /// `session` already contains the user message for `prompt`.
    async fn respond(&self, session: &ChatSession, prompt: &str) -> Result<ChatMessage>;
}

/// Replies with fixed text and citations.
#[derive(Debug, Clone)]
pub struct StaticResponder {
    reply: String,
    citations: Vec<Citation>,
}

impl StaticResponder {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            citations: Vec::new(),
        }
    }

    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }
}

impl Default for StaticResponder {
    fn default() -> Self {
        Self::new(
            "I've logged your question. Share an IP, URL, file hash or upload a file and I'll run a threat-intelligence lookup.",
        )
    }
}

#[async_trait]
impl ConversationalResponder for StaticResponder {
    async fn respond(&self, _session: &ChatSession, _prompt: &str) -> Result<ChatMessage> {
        Ok(ChatMessage::assistant(self.reply.clone()).with_citations(self.citations.clone()))
    }
}
