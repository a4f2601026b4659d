//! Groq API client
//!
//! Direct HTTP client for the Groq chat-completions endpoint, which speaks
//! the OpenAI wire format. The transcript is sent as-is (the system persona
//! turn travels inside the message list), with fixed generation parameters.
//!
//! ```ignore
//! let llm = GroqProvider::new("gsk_...", "llama3-70b-8192", Duration::from_secs(60))?;
//! let reply = llm.complete(&transcript).await?;
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::conversation::Message;
use crate::core::{RelayError, RelayResult};

use super::provider::CompletionProvider;

const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Sampling temperature used for every request
const TEMPERATURE: f64 = 0.8;
/// Upper bound on generated tokens per reply
const MAX_TOKENS: u32 = 1024;

// ============================================================================
// Groq request/response types (OpenAI chat-completions format)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// ============================================================================
// GroqProvider
// ============================================================================

/// Groq chat-completion provider
pub struct GroqProvider {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GroqProvider {
    /// Create a new Groq provider
    ///
    /// `timeout` bounds each completion round trip; a hung upstream call
    /// fails the request instead of hanging it forever.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> RelayResult<Self> {
        let model = model.into();
        tracing::info!("Using completion model: {}", model);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::completion(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Override the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn send_request(&self, request: &ChatCompletionRequest<'_>) -> RelayResult<String> {
        let url = format!("{}/chat/completions", self.api_base);

        tracing::debug!("[Groq] Request: {} messages to {}", request.messages.len(), url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::completion(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::completion(format!("Failed to read response body: {}", e)))?;

        tracing::debug!("[Groq] Response status: {}", status);

        if !status.is_success() {
            tracing::error!("[Groq] API error: {} - {}", status, body);
            return Err(RelayError::completion(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| RelayError::completion(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| RelayError::completion("Response contained no choices"))
    }
}

#[async_trait::async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(&self, transcript: &[Message]) -> RelayResult<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: transcript,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let text = self.send_request(&request).await?;
        tracing::info!("[Groq] Received reply, length: {} chars", text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let messages = vec![Message::system("persona"), Message::user("hi")];
        let request = ChatCompletionRequest {
            model: "llama3-70b-8192",
            messages: &messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3-70b-8192");
        assert_eq!(json["temperature"], 0.8);
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Hello there!"}}
            ]
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Hello there!")
        );
    }

    #[test]
    fn test_response_with_no_choices() {
        let parsed: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
