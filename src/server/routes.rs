//! HTTP routes for the relay
//!
//! One endpoint: `POST /chat`. Every failure path maps to an explicit status,
//! with the real error kept server-side and a fixed body returned to the
//! caller.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::conversation::ChatService;
use crate::core::RelayError;

const NOT_JSON_ERROR: &str = "Content-Type must be application/json";
const INTERNAL_ERROR: &str = "An error occurred processing your request";

/// Shared state injected into the chat handler
#[derive(Clone)]
pub struct AppState {
    chat: Arc<ChatService>,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: Option<String>,
    session_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::EmptyMessage => {
                error_response(StatusCode::BAD_REQUEST, &self.to_string())
            }
            err => {
                tracing::error!("Error processing chat request: {}", err);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
            }
        }
    }
}

/// Build the relay router with permissive CORS
pub fn router(chat: Arc<ChatService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(chat_handler))
        .layer(cors)
        .with_state(AppState { chat })
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, NOT_JSON_ERROR);
        }
    };

    // A request without a session id always starts a fresh session
    let session_id = request.session_id.unwrap_or_else(|| {
        let id = Uuid::new_v4().to_string();
        tracing::debug!("No session id supplied, generated {}", id);
        id
    });
    let message = request.message.unwrap_or_default();

    match state.chat.handle(&session_id, &message).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { response: reply })).into_response(),
        Err(err) => err.into_response(),
    }
}
