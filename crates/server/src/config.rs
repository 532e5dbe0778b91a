//! Server configuration

use std::str::FromStr;

/// Retrieval knobs for Maximal Marginal Relevance search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrievalParams {
    /// Passages handed to the model
    pub k: usize,
    /// Candidates fetched from the vector store before re-ranking
    pub fetch_k: usize,
    /// 1.0 favours relevance, 0.0 favours diversity
    pub lambda_mult: f32,
}

impl Default for RetrievalParams {
    fn default() -> Self {
        Self {
            k: 3,
            fetch_k: 10,
            lambda_mult: 0.5,
        }
    }
}

/// Chat completion settings
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.4,
            max_tokens: 500,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub cors_origins: Vec<String>,
    pub rate_limit_rps: u32,
    pub pinecone_api_key: Option<String>,
    pub pinecone_index: String,
    /// Data-plane host; resolved from the index name when unset
    pub pinecone_host: Option<String>,
    pub groq_api_key: Option<String>,
    pub hf_api_token: Option<String>,
    pub embedding_url: String,
    pub embedding_model: String,
    pub retrieval: RetrievalParams,
    pub chat: ChatSettings,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let chat = ChatSettings {
            model: env_or("GROQ_MODEL", &ChatSettings::default().model),
            ..ChatSettings::default()
        };

        Self {
            bind_address: env_or("BIND_ADDRESS", "0.0.0.0:8080"),
            cors_origins: env_or("CORS_ORIGINS", "*")
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            rate_limit_rps: env_parse("RATE_LIMIT_RPS", 50),
            pinecone_api_key: env_opt("PINECONE_API_KEY"),
            pinecone_index: env_or("PINECONE_INDEX", "healthbot"),
            pinecone_host: env_opt("PINECONE_HOST"),
            groq_api_key: env_opt("GROQ_API_KEY"),
            hf_api_token: env_opt("HF_API_TOKEN"),
            embedding_url: env_or(
                "EMBEDDING_URL",
                "https://router.huggingface.co/hf-inference/models",
            ),
            embedding_model: env_or(
                "EMBEDDING_MODEL",
                "sentence-transformers/all-MiniLM-L6-v2",
            ),
            retrieval: RetrievalParams::default(),
            chat,
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}
