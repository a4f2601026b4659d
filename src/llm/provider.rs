//! Completion provider trait
//!
//! Abstracts the chat-completion interface so the live Groq backend and test
//! fakes can be used interchangeably by the chat service.

use crate::conversation::Message;
use crate::core::RelayResult;

/// Trait for services that turn a transcript into one assistant reply.
///
/// The full ordered transcript (system turn, prior exchanges, and the newest
/// user turn) is passed on every call; providers are stateless with respect
/// to conversations.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate one assistant reply for the given transcript.
    async fn complete(&self, transcript: &[Message]) -> RelayResult<String>;
}
