//! Application error handling
//!
//! Every failure on the chat path ends up here and is reported as a
//! 500 response carrying the error's description.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::ai::AiError;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing form field '{0}'")]
    MissingField(&'static str),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Pipeline(#[from] AiError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), format!("Error: {}", self)).into_response()
    }
}
