//! HTTP request handlers

use super::assets::{serve_index, serve_static};
use super::types::{ChatRequest, ChatResponse, SaveUserRequest, SuccessResponse};
use super::AppState;
use crate::directive::parse_directive;
use crate::llm::{LlmMessage, LlmRequest};
use crate::system_prompt::{build_system_prompt, DEFAULT_USER_NAME};
use crate::widget::CommandTable;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

const NO_RESPONSE_REPLY: &str = "🤖 Sorry, no response from model.";
const UPSTREAM_STATUS_REPLY: &str = "⚠️ LM Studio connection failed.";
const UPSTREAM_ERROR_REPLY: &str = "⚠️ Error contacting the local AI model.";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the widget page
        .route("/", get(serve_index))
        .route("/chat", post(chat))
        .route("/saveUser", post(save_user))
        .route("/commands", get(list_commands))
        .route("/version", get(get_version))
        // Everything else: embedded assets
        .fallback(serve_static)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================
// Chat relay
// ============================================================

fn build_request(state: &AppState, req: &ChatRequest) -> LlmRequest {
    let name = req.name.as_deref().unwrap_or(DEFAULT_USER_NAME);
    let page = req.page_content.as_deref().unwrap_or_default();

    let mut messages = vec![LlmMessage::system(build_system_prompt(name, page))];
    messages.extend(req.history_messages());
    messages.push(LlmMessage::user(req.message.clone()));

    LlmRequest {
        messages,
        temperature: Some(state.temperature),
    }
}

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ChatResponse>) {
    let request = build_request(&state, &req);

    match state.llm.complete(&request).await {
        Ok(response) => {
            let text = response
                .text
                .unwrap_or_else(|| NO_RESPONSE_REPLY.to_string());

            let body = match parse_directive(&text) {
                Some(directive) => {
                    tracing::debug!(?directive, "Model replied with a page directive");
                    ChatResponse {
                        reply: directive.describe(),
                        details: None,
                        directive: Some(directive),
                    }
                }
                None => ChatResponse::reply(text),
            };
            (StatusCode::OK, Json(body))
        }
        Err(e) if e.is_upstream_status() => {
            let details = e.details.unwrap_or_default();
            tracing::error!(
                kind = e.kind.as_str(),
                error = %e.message,
                body = %details,
                "Completion API returned an error status"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatResponse {
                    reply: UPSTREAM_STATUS_REPLY.to_string(),
                    details: Some(details),
                    directive: None,
                }),
            )
        }
        Err(e) => {
            tracing::error!(kind = e.kind.as_str(), error = %e.message, "Chat relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatResponse::reply(UPSTREAM_ERROR_REPLY)),
            )
        }
    }
}

// ============================================================
// Onboarding
// ============================================================

async fn save_user(Json(req): Json<SaveUserRequest>) -> Json<SuccessResponse> {
    tracing::info!(
        name = %req.name,
        email = %req.email,
        phone = %req.phone,
        "New user joined"
    );
    Json(SuccessResponse { success: true })
}

// ============================================================
// Navigation table and version
// ============================================================

async fn list_commands(State(state): State<AppState>) -> Json<CommandTable> {
    Json(state.commands.as_ref().clone())
}

async fn get_version() -> &'static str {
    concat!("eva-assistant ", env!("CARGO_PKG_VERSION"))
}
