//! Pinecone vector store client with MMR re-ranking

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tokio::sync::OnceCell;

use super::{AiError, api_error};
use crate::config::RetrievalParams;

const CONTROL_PLANE_URL: &str = "https://api.pinecone.io";
const API_VERSION: &str = "2024-07";
const SERVICE: &str = "Pinecone";

/// Metadata key holding the passage text
const TEXT_KEY: &str = "text";

/// A passage returned by retrieval
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    pub id: String,
    pub score: f32,
    pub text: String,
}

/// Client for one Pinecone index
pub struct VectorStore {
    http: reqwest::Client,
    api_key: String,
    index_name: String,
    /// Data-plane base URL, resolved once from the control plane if not configured
    host: OnceCell<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_values: bool,
    include_metadata: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    values: Vec<f32>,
    #[serde(default)]
    metadata: Option<Map<String, JsonValue>>,
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
}

impl VectorStore {
    pub fn new(
        http: reqwest::Client,
        api_key: String,
        index_name: String,
        host: Option<String>,
    ) -> Self {
        let cell = match host {
            Some(host) => OnceCell::new_with(Some(normalize_host(&host))),
            None => OnceCell::new(),
        };
        Self {
            http,
            api_key,
            index_name,
            host: cell,
        }
    }

    /// Retrieve `params.k` passages for a query embedding.
    ///
    /// Fetches `params.fetch_k` nearest neighbours with their vectors, then
    /// keeps a diverse subset chosen by Maximal Marginal Relevance.
    pub async fn search_mmr(
        &self,
        query: &[f32],
        params: &RetrievalParams,
    ) -> Result<Vec<Passage>, AiError> {
        let matches = self.query(query, params.fetch_k).await?;
        tracing::debug!(candidates = matches.len(), "Vector store returned candidates");
        select_passages(query, matches, params)
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>, AiError> {
        let host = self.host().await?;
        let request = QueryRequest {
            vector,
            top_k,
            include_values: true,
            include_metadata: true,
        };

        let response = self
            .http
            .post(format!("{host}/query"))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(AiError::http(SERVICE))?;

        if !response.status().is_success() {
            return Err(api_error(SERVICE, response).await);
        }

        let body = response
            .json::<QueryResponse>()
            .await
            .map_err(|e| AiError::malformed(SERVICE, e.to_string()))?;
        Ok(body.matches)
    }

    async fn host(&self) -> Result<&str, AiError> {
        self.host
            .get_or_try_init(|| self.describe_index())
            .await
            .map(String::as_str)
    }

    async fn describe_index(&self) -> Result<String, AiError> {
        let response = self
            .http
            .get(format!("{CONTROL_PLANE_URL}/indexes/{}", self.index_name))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .send()
            .await
            .map_err(AiError::http(SERVICE))?;

        if !response.status().is_success() {
            return Err(api_error(SERVICE, response).await);
        }

        let description = response
            .json::<IndexDescription>()
            .await
            .map_err(|e| AiError::malformed(SERVICE, e.to_string()))?;

        tracing::info!(index = %self.index_name, host = %description.host, "Resolved vector index host");
        Ok(normalize_host(&description.host))
    }
}

/// Hosts from the control plane come without a scheme
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

/// Re-rank candidates with MMR and keep those that carry text
fn select_passages(
    query: &[f32],
    matches: Vec<QueryMatch>,
    params: &RetrievalParams,
) -> Result<Vec<Passage>, AiError> {
    // Matches without vectors cannot be compared
    let matches: Vec<QueryMatch> = matches
        .into_iter()
        .filter(|m| !m.values.is_empty())
        .collect();

    let embeddings: Vec<Vec<f32>> = matches.iter().map(|m| m.values.clone()).collect();
    let picked = healthbot_core::maximal_marginal_relevance(
        query,
        &embeddings,
        params.lambda_mult,
        params.k,
    )?;

    let mut slots: Vec<Option<QueryMatch>> = matches.into_iter().map(Some).collect();
    let passages = picked
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .filter_map(|m| {
            let text = m
                .metadata
                .as_ref()
                .and_then(|meta| meta.get(TEXT_KEY))
                .and_then(|v| v.as_str())?
                .to_string();
            Some(Passage {
                id: m.id,
                score: m.score,
                text,
            })
        })
        .collect();

    Ok(passages)
}
