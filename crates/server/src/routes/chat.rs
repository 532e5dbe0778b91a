//! Chat endpoints: `/get` (form, plain text) and `/chat` (JSON)

use axum::{
    Extension, Form, Json,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use healthbot_core::{FormattedResponse, SectionTitle, detect_requested_sections, format_response};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::AppError;
use crate::middleware::RequestId;
use crate::middleware::metrics::{record_failure, record_sections};

/// Form body (or query string for GET) of `/get`
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    msg: Option<String>,
}

/// Request body for `/chat`
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    message: String,
}

/// Response body for `/chat`
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sections: Vec<SectionTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the pipeline for one message and shape the answer
async fn answer_message(state: &AppState, message: &str) -> Result<FormattedResponse, AppError> {
    let raw = state.answers.answer(message).await?;
    tracing::debug!(response = %raw, "Raw model answer");

    let requested = detect_requested_sections(message);
    let formatted = format_response(&raw, &requested);
    tracing::info!(
        requested = ?requested,
        emitted = ?formatted.sections,
        "Formatted answer"
    );

    record_sections(&formatted.sections);
    Ok(formatted)
}

/// Extract `msg` from the form and answer it
async fn reply_to_form(
    state: &AppState,
    request_id: &str,
    form: Result<Form<ChatForm>, FormRejection>,
) -> Result<FormattedResponse, AppError> {
    let Form(form) = form.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let msg = form.msg.ok_or(AppError::MissingField("msg"))?;
    tracing::info!(request_id = %request_id, input = %msg, "Chat request");

    answer_message(state, &msg).await
}

/// Parse the JSON body and answer its message
async fn reply_to_json(
    state: &AppState,
    request_id: &str,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<FormattedResponse, AppError> {
    let Json(body) = body.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    tracing::info!(request_id = %request_id, input = %body.message, "Chat request");

    answer_message(state, &body.message).await
}

/// GET|POST /get - Answer the `msg` form field with the formatted sections
///
/// Any failure, including a missing field, becomes a 500 with `Error: <message>`.
pub async fn get_reply(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    form: Result<Form<ChatForm>, FormRejection>,
) -> Result<String, AppError> {
    match reply_to_form(&state, &request_id, form).await {
        Ok(formatted) => Ok(formatted.text),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Chat request failed");
            record_failure("/get");
            Err(e)
        }
    }
}

/// POST /chat - JSON variant used by the bundled web page
pub async fn chat(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    match reply_to_json(&state, &request_id, body).await {
        Ok(formatted) => (
            StatusCode::OK,
            Json(ChatResponse {
                success: true,
                response: Some(formatted.text),
                sections: formatted.sections,
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Chat request failed");
            record_failure("/chat");
            (
                e.status(),
                Json(ChatResponse {
                    success: false,
                    response: None,
                    sections: Vec::new(),
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}
