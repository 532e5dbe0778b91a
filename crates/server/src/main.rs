//! healthbot-server: retrieval-augmented health assistant binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use healthbot_server::ai::RagPipeline;
use healthbot_server::config::Config;

#[tokio::main]
async fn main() {
    // Pick up a local .env before reading the environment
    let dotenv_loaded = dotenv::dotenv().is_ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    if dotenv_loaded {
        tracing::info!("Loaded environment from .env");
    }

    // Load configuration
    let config = Config::from_env();

    // Log startup info
    if config.pinecone_api_key.is_some() {
        tracing::info!(index = %config.pinecone_index, "Pinecone API key configured");
    } else {
        tracing::warn!("PINECONE_API_KEY not set, chat requests will fail");
    }
    if config.groq_api_key.is_some() {
        tracing::info!(model = %config.chat.model, "Groq API key configured");
    } else {
        tracing::warn!("GROQ_API_KEY not set, chat requests will fail");
    }
    tracing::info!(
        k = config.retrieval.k,
        fetch_k = config.retrieval.fetch_k,
        lambda_mult = config.retrieval.lambda_mult,
        "MMR retrieval settings"
    );
    tracing::info!("Rate limiting: {} requests/second", config.rate_limit_rps);

    // Build application
    let pipeline = Arc::new(RagPipeline::from_config(&config));
    let app = healthbot_server::build_app(pipeline, &config);

    // Start server
    let addr: SocketAddr = config.bind_address.parse().expect("Invalid bind address");
    tracing::info!("Starting healthbot server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server shutdown complete");
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
