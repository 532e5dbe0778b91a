//! Clients for the hosted services behind the answer pipeline

pub mod client;
pub mod embeddings;
pub mod pipeline;
pub mod prompt;
pub mod vector_store;

use thiserror::Error;

pub use client::ChatClient;
pub use embeddings::EmbeddingClient;
pub use pipeline::{AnswerSource, RagPipeline};
pub use vector_store::VectorStore;

/// Failure talking to an external service
#[derive(Debug, Error)]
pub enum AiError {
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    #[error("{service} request failed: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} API error ({status}): {message}")]
    Api {
        service: &'static str,
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Malformed {service} response: {message}")]
    Malformed {
        service: &'static str,
        message: String,
    },

    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] healthbot_core::CoreError),
}

impl AiError {
    pub(crate) fn http(service: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| AiError::Http { service, source }
    }

    pub(crate) fn malformed(service: &'static str, message: impl Into<String>) -> Self {
        AiError::Malformed {
            service,
            message: message.into(),
        }
    }
}

/// Turn a non-success response into `AiError::Api`, preferring the API's own
/// error message when the body carries one.
pub(crate) async fn api_error(service: &'static str, response: reqwest::Response) -> AiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    AiError::Api {
        service,
        status,
        message: error_message(&body).unwrap_or(body),
    }
}

/// Pull a human-readable message out of the common error body shapes:
/// `{"error": {"message": ..}}`, `{"error": ".."}` and `{"message": ..}`.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = match value.get("error") {
        Some(serde_json::Value::String(s)) => Some(s.as_str()),
        Some(err) => err.get("message").and_then(|m| m.as_str()),
        None => value.get("message").and_then(|m| m.as_str()),
    };
    message.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_reads_openai_style_body() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        assert_eq!(error_message(body).as_deref(), Some("Invalid API Key"));
    }

    #[test]
    fn error_message_reads_flat_bodies() {
        assert_eq!(
            error_message(r#"{"error": "Model is loading"}"#).as_deref(),
            Some("Model is loading")
        );
        assert_eq!(
            error_message(r#"{"code": 16, "message": "Unauthenticated"}"#).as_deref(),
            Some("Unauthenticated")
        );
    }

    #[test]
    fn error_message_gives_up_on_plain_text() {
        assert_eq!(error_message("Bad Gateway"), None);
    }

    #[test]
    fn not_configured_names_the_variable() {
        assert_eq!(
            AiError::NotConfigured("GROQ_API_KEY").to_string(),
            "GROQ_API_KEY not configured"
        );
    }
}
