//! Groq chat client for the OpenAI-compatible Chat Completions API

use serde::{Deserialize, Serialize};

use super::{AiError, api_error};
use crate::config::ChatSettings;

const API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const SERVICE: &str = "Groq";

/// Client for hosted chat completions
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    api_key: String,
    url: String,
    settings: ChatSettings,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: Some(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
        }
    }
}

/// Request body for chat completions
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

/// Response from chat completions
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[allow(dead_code)]
    pub id: Option<String>,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Message,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl ChatClient {
    /// Create a new client with the given API key
    pub fn new(http: reqwest::Client, api_key: String, settings: ChatSettings) -> Self {
        Self {
            http,
            api_key,
            url: API_URL.to_string(),
            settings,
        }
    }

    /// Send a system prompt and a user message, return the answer text
    pub async fn message(&self, system: &str, user_message: &str) -> Result<String, AiError> {
        let messages = [Message::system(system), Message::user(user_message)];
        let response = self.send(&messages).await?;
        extract_text(&response)
    }

    /// Send a full chat completion request
    pub async fn send(&self, messages: &[Message]) -> Result<ApiResponse, AiError> {
        let request = ApiRequest {
            model: &self.settings.model,
            messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(AiError::http(SERVICE))?;

        if !response.status().is_success() {
            return Err(api_error(SERVICE, response).await);
        }

        response
            .json::<ApiResponse>()
            .await
            .map_err(|e| AiError::malformed(SERVICE, e.to_string()))
    }
}

/// Extract the first choice's text from a completion
pub fn extract_text(response: &ApiResponse) -> Result<String, AiError> {
    let choice = response
        .choices
        .first()
        .ok_or_else(|| AiError::malformed(SERVICE, "no choices in response"))?;

    if choice.finish_reason.as_deref() == Some("length") {
        tracing::debug!("Chat completion truncated at max_tokens");
    }

    choice
        .message
        .content
        .clone()
        .ok_or_else(|| AiError::malformed(SERVICE, "no text content in response"))
}
