//! Sentence embeddings through the Hugging Face inference API

use serde::{Deserialize, Serialize};

use super::{AiError, api_error};

const SERVICE: &str = "Embedding";

/// Client for the `feature-extraction` pipeline of a hosted embedding model
#[derive(Clone)]
pub struct EmbeddingClient {
    http: reqwest::Client,
    url: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    inputs: &'a str,
}

/// Sentence-transformer models return one pooled vector; raw encoders
/// return one vector per token.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiResponse {
    Pooled(Vec<f32>),
    Tokens(Vec<Vec<f32>>),
}

impl EmbeddingClient {
    /// `base_url` is the models endpoint; the model id is appended to it.
    pub fn new(http: reqwest::Client, base_url: &str, model: &str, token: Option<String>) -> Self {
        let url = format!(
            "{}/{}/pipeline/feature-extraction",
            base_url.trim_end_matches('/'),
            model
        );
        Self { http, url, token }
    }

    /// Embed a single text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, AiError> {
        let mut request = self.http.post(&self.url).json(&ApiRequest { inputs: text });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(AiError::http(SERVICE))?;

        if !response.status().is_success() {
            return Err(api_error(SERVICE, response).await);
        }

        let body = response
            .json::<ApiResponse>()
            .await
            .map_err(|e| AiError::malformed(SERVICE, e.to_string()))?;

        into_vector(body)
    }
}

fn into_vector(response: ApiResponse) -> Result<Vec<f32>, AiError> {
    let vector = match response {
        ApiResponse::Pooled(vector) => vector,
        ApiResponse::Tokens(rows) => mean_pool(&rows)?,
    };

    if vector.is_empty() {
        return Err(AiError::malformed(SERVICE, "empty embedding"));
    }
    Ok(vector)
}

fn mean_pool(rows: &[Vec<f32>]) -> Result<Vec<f32>, AiError> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };

    let mut sum = vec![0.0f32; first.len()];
    for row in rows {
        if row.len() != sum.len() {
            return Err(AiError::malformed(SERVICE, "ragged token embeddings"));
        }
        for (acc, value) in sum.iter_mut().zip(row) {
            *acc += value;
        }
    }

    let count = rows.len() as f32;
    Ok(sum.into_iter().map(|v| v / count).collect())
}
