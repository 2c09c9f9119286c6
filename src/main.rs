//! Eva relay server
//!
//! Serves the chat widget and relays its messages to a locally hosted
//! completion API.

use eva_assistant::api::{create_router, AppState};
use eva_assistant::config::ServerConfig;
use eva_assistant::llm::{LlmService, LoggingService, OpenAICompatService};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eva_assistant=info,eva_server=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = ServerConfig::from_env();

    let upstream = OpenAICompatService::new(&config.llm)?;
    tracing::info!(
        endpoint = %upstream.endpoint(),
        model = %config.llm.model,
        "Completion API configured"
    );
    let llm: Arc<dyn LlmService> = Arc::new(LoggingService::new(Arc::new(upstream)));

    let state = AppState::new(llm, config.llm.temperature);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state).layer(cors).layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Eva relay listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
