//! Conversation turn processing
//!
//! One `handle` call runs a complete exchange: append the user turn, send the
//! whole transcript to the completion provider, append the assistant turn,
//! and hand the pair to the exchange logger. The session lock is held for the
//! full turn, so two concurrent requests with the same session id cannot
//! interleave their transcript mutations.

use std::sync::Arc;

use crate::core::{RelayError, RelayResult};
use crate::llm::CompletionProvider;
use crate::sheets::ExchangeLogger;

use super::message::Message;
use super::store::SessionStore;

/// Processes chat turns against the session store and the two collaborators
pub struct ChatService {
    store: SessionStore,
    provider: Arc<dyn CompletionProvider>,
    logger: Arc<dyn ExchangeLogger>,
}

impl ChatService {
    /// Create a chat service over an injected store, provider, and logger
    pub fn new(
        store: SessionStore,
        provider: Arc<dyn CompletionProvider>,
        logger: Arc<dyn ExchangeLogger>,
    ) -> Self {
        Self {
            store,
            provider,
            logger,
        }
    }

    /// Run one exchange for `session_id` and return the assistant's reply.
    ///
    /// On a provider failure the user turn stays appended and no assistant
    /// turn is added; on a logging failure the assistant turn stays appended
    /// but the error still propagates, so the caller sees a failure even
    /// though a reply was generated.
    pub async fn handle(&self, session_id: &str, user_text: &str) -> RelayResult<String> {
        if user_text.trim().is_empty() {
            return Err(RelayError::EmptyMessage);
        }

        let session = self.store.get_or_create(session_id);
        let mut transcript = session.lock().await;

        transcript.push(Message::user(user_text));

        tracing::debug!(
            "Session {}: requesting completion over {} messages",
            session_id,
            transcript.len()
        );

        let reply = self.provider.complete(&transcript).await?;

        transcript.push(Message::assistant(&reply));

        self.logger.record(session_id, user_text, &reply).await?;

        Ok(reply)
    }

    /// Access the underlying session store
    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}
