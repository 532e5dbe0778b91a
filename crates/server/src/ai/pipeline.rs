//! Retrieval-augmented answer pipeline

use async_trait::async_trait;

use super::{AiError, ChatClient, EmbeddingClient, VectorStore, prompt};
use crate::config::{Config, RetrievalParams};

/// Something that turns a user question into a raw model answer
#[async_trait]
pub trait AnswerSource: Send + Sync {
    /// Produce the raw answer text for `query`
    async fn answer(&self, query: &str) -> Result<String, AiError>;

    /// Report why the source cannot serve requests, if it cannot
    fn readiness(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Embed → retrieve (MMR) → prompt → chat completion
pub struct RagPipeline {
    embeddings: EmbeddingClient,
    store: Option<VectorStore>,
    chat: Option<ChatClient>,
    retrieval: RetrievalParams,
}

impl RagPipeline {
    /// Build the pipeline from configuration.
    ///
    /// Missing credentials do not fail construction; each answer call then
    /// reports the missing variable instead.
    pub fn from_config(config: &Config) -> Self {
        let http = reqwest::Client::new();

        let embeddings = EmbeddingClient::new(
            http.clone(),
            &config.embedding_url,
            &config.embedding_model,
            config.hf_api_token.clone(),
        );
        let store = config.pinecone_api_key.as_ref().map(|key| {
            VectorStore::new(
                http.clone(),
                key.clone(),
                config.pinecone_index.clone(),
                config.pinecone_host.clone(),
            )
        });
        let chat = config
            .groq_api_key
            .as_ref()
            .map(|key| ChatClient::new(http.clone(), key.clone(), config.chat.clone()));

        Self {
            embeddings,
            store,
            chat,
            retrieval: config.retrieval,
        }
    }

    fn clients(&self) -> Result<(&VectorStore, &ChatClient), AiError> {
        let store = self
            .store
            .as_ref()
            .ok_or(AiError::NotConfigured("PINECONE_API_KEY"))?;
        let chat = self
            .chat
            .as_ref()
            .ok_or(AiError::NotConfigured("GROQ_API_KEY"))?;
        Ok((store, chat))
    }
}

#[async_trait]
impl AnswerSource for RagPipeline {
    async fn answer(&self, query: &str) -> Result<String, AiError> {
        let (store, chat) = self.clients()?;

        let embedding = self.embeddings.embed(query).await?;
        let passages = store.search_mmr(&embedding, &self.retrieval).await?;
        tracing::debug!(
            passages = passages.len(),
            ids = ?passages.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            "Retrieved context"
        );

        let system = prompt::system_prompt(&passages);
        chat.message(&system, query).await
    }

    fn readiness(&self) -> Result<(), String> {
        self.clients().map(|_| ()).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pinecone: Option<&str>, groq: Option<&str>) -> Config {
        Config {
            bind_address: "127.0.0.1:0".to_string(),
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 10,
            pinecone_api_key: pinecone.map(str::to_string),
            pinecone_index: "healthbot".to_string(),
            pinecone_host: None,
            groq_api_key: groq.map(str::to_string),
            hf_api_token: None,
            embedding_url: "http://127.0.0.1:1".to_string(),
            embedding_model: "test-model".to_string(),
            retrieval: RetrievalParams::default(),
            chat: Default::default(),
        }
    }

    #[tokio::test]
    async fn missing_vector_store_key_fails_the_call() {
        let pipeline = RagPipeline::from_config(&config(None, Some("groq")));
        let err = pipeline.answer("What is flu?").await.unwrap_err();

        assert_eq!(err.to_string(), "PINECONE_API_KEY not configured");
    }

    #[tokio::test]
    async fn missing_chat_key_fails_the_call() {
        let pipeline = RagPipeline::from_config(&config(Some("pc"), None));
        let err = pipeline.answer("What is flu?").await.unwrap_err();

        assert_eq!(err.to_string(), "GROQ_API_KEY not configured");
    }

    #[test]
    fn readiness_reflects_credentials() {
        assert!(RagPipeline::from_config(&config(Some("pc"), Some("groq"))).readiness().is_ok());
        assert!(RagPipeline::from_config(&config(None, None)).readiness().is_err());
    }
}
