// src/ai/handlers.rs
//! Soil insights and assistant chat. Both endpoints are public; errors keep
//! the endpoint's own response key (`result` / `reply`).

use axum::{
    extract::{rejection::JsonRejection, Extension, Json},
    http::StatusCode,
};
use tracing::{debug, info};

use super::models::{ChatRequest, ChatResponse, InsightsRequest, InsightsResponse};
use super::prompts;
use crate::common::SharedState;
use crate::services::{monitoring, AiError};

/// Map an upstream failure to a status and user-facing message
fn describe_ai_error(err: &AiError) -> (StatusCode, String) {
    match err {
        AiError::InvalidApiKey | AiError::NotConfigured => (
            StatusCode::INTERNAL_SERVER_ERROR,
            prompts::INVALID_KEY_MESSAGE.to_string(),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: {}", other),
        ),
    }
}

/// Unreadable request bodies, reported under the endpoint's own key
fn describe_rejection(rejection: &JsonRejection) -> String {
    format!("Invalid request body: {}", rejection.body_text())
}

/// POST /api/ai/insights
pub async fn insights_handler(
    Extension(state_lock): Extension<SharedState>,
    payload: Result<Json<InsightsRequest>, JsonRejection>,
) -> (StatusCode, Json<InsightsResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(InsightsResponse {
                    result: describe_rejection(&rejection),
                }),
            );
        }
    };
    let Some(reading) = request.into_reading() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(InsightsResponse {
                result: "Please provide ph, moisture and crop.".to_string(),
            }),
        );
    };

    let model = state_lock.read().await.ai_model.clone();

    let Some(model) = model else {
        debug!(crop = %reading.crop, "No AI key configured, using local insight template");
        return (
            StatusCode::OK,
            Json(InsightsResponse {
                result: prompts::local_insights(&reading),
            }),
        );
    };

    match model.generate(&prompts::insights_prompt(&reading)).await {
        Ok(text) => {
            info!(crop = %reading.crop, "Generated soil insights");
            (StatusCode::OK, Json(InsightsResponse { result: text }))
        }
        Err(e) => {
            monitoring::capture_upstream_error("ai", &e);
            let (status, result) = describe_ai_error(&e);
            (status, Json(InsightsResponse { result }))
        }
    }
}

/// POST /api/ai/chat
pub async fn chat_handler(
    Extension(state_lock): Extension<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> (StatusCode, Json<ChatResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ChatResponse {
                    reply: describe_rejection(&rejection),
                }),
            );
        }
    };
    let message = match request.message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ChatResponse {
                    reply: "Please provide a message.".to_string(),
                }),
            );
        }
    };

    let model = state_lock.read().await.ai_model.clone();

    let Some(model) = model else {
        return (
            StatusCode::OK,
            Json(ChatResponse {
                reply: prompts::local_chat_reply(&message),
            }),
        );
    };

    match model.generate(&prompts::chat_prompt(&message)).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { reply })),
        Err(e) => {
            monitoring::capture_upstream_error("ai", &e);
            let (status, reply) = describe_ai_error(&e);
            (status, Json(ChatResponse { reply }))
        }
    }
}
