//! Exchange logging to Google Sheets
//!
//! One completed turn becomes one appended row:
//! `[timestamp, session id, user text, assistant text]`. Fire-and-forget in
//! the sense of no retry; failures propagate to the caller.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use crate::core::{RelayError, RelayResult};

use super::auth::SheetsAuth;

const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Sheet range the relay appends to
const LOG_RANGE: &str = "Chats!A:E";

/// Trait for recording one completed exchange.
///
/// Mirrors the completion seam: the live Sheets client and test fakes both
/// implement it, so the chat service never knows where rows go.
#[async_trait::async_trait]
pub trait ExchangeLogger: Send + Sync {
    /// Append one `[timestamp, session_id, user_text, assistant_text]` row.
    async fn record(
        &self,
        session_id: &str,
        user_text: &str,
        assistant_text: &str,
    ) -> RelayResult<()>;
}

#[derive(Debug, Serialize)]
struct AppendRequest {
    values: Vec<Vec<String>>,
}

/// Google Sheets exchange logger
pub struct SheetsLogger {
    client: Client,
    auth: SheetsAuth,
    spreadsheet_id: String,
    api_base: String,
}

impl SheetsLogger {
    /// Create a logger appending to `spreadsheet_id`
    pub fn new(
        auth: SheetsAuth,
        spreadsheet_id: impl Into<String>,
        timeout: Duration,
    ) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::logging(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            auth,
            spreadsheet_id: spreadsheet_id.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Override the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Acquire the initial bearer token so startup fails fast on bad credentials
    pub async fn warm_up(&self) -> RelayResult<()> {
        self.auth.bearer_token().await?;
        Ok(())
    }

    fn build_row(session_id: &str, user_text: &str, assistant_text: &str) -> Vec<String> {
        vec![
            chrono::Utc::now().to_rfc3339(),
            session_id.to_string(),
            user_text.to_string(),
            assistant_text.to_string(),
        ]
    }
}

#[async_trait::async_trait]
impl ExchangeLogger for SheetsLogger {
    async fn record(
        &self,
        session_id: &str,
        user_text: &str,
        assistant_text: &str,
    ) -> RelayResult<()> {
        let token = self.auth.bearer_token().await?;

        let url = format!(
            "{}/spreadsheets/{}/values/{}:append",
            self.api_base, self.spreadsheet_id, LOG_RANGE
        );
        let body = AppendRequest {
            values: vec![Self::build_row(session_id, user_text, assistant_text)],
        };

        tracing::debug!("[Sheets] Appending exchange row for session {}", session_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::logging(format!("Failed to send append request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("[Sheets] Append error: {} - {}", status, body);
            return Err(RelayError::logging(format!(
                "Append error ({}): {}",
                status, body
            )));
        }

        tracing::info!("[Sheets] Logged exchange for session {}", session_id);

        Ok(())
    }
}
