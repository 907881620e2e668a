mod api;
mod config;
mod moderation;
mod services;
mod storage;
mod suggestions;

use crate::api::AppState;
use crate::config::{AppConfig, StorageBackend};
use crate::services::BlogService;
use crate::storage::{BlogStore, InMemoryStore, MongoStore};
use crate::suggestions::TemplateSuggester;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so the level can come from it
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("🚀 Starting Blog API Server");
    info!("📋 Configuration loaded");
    info!("   - Storage: {}", config.storage.backend);
    info!("   - Server: {}", config.bind_addr());

    // Initialize storage
    info!("💾 Initializing storage...");
    let store: Arc<dyn BlogStore> = match config.storage.backend {
        StorageBackend::Mongo => Arc::new(
            MongoStore::connect(&config.storage.mongo_uri, &config.storage.database).await?,
        ),
        StorageBackend::Memory => {
            warn!("⚠️  Using in-memory storage, data is lost on shutdown");
            Arc::new(InMemoryStore::new())
        }
    };
    info!("✅ Storage ready");

    // Create application state
    let state = AppState {
        blog: Arc::new(BlogService::new(store)),
        suggester: Arc::new(TemplateSuggester::new()),
    };

    let app = api::router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET    /health                              - Health check");
    info!("   POST   /api/auth/login                      - Log in");
    info!("   POST   /api/auth/signup                     - Sign up");
    info!("   GET    /api/posts                           - List posts");
    info!("   POST   /api/posts                           - Create post");
    info!("   GET    /api/posts/{{id}}                      - Fetch post");
    info!("   PUT    /api/posts/{{id}}                      - Update post");
    info!("   DELETE /api/posts/{{id}}                      - Delete post");
    info!("   POST   /api/posts/{{id}}/like                 - Like post");
    info!("   POST   /api/posts/{{id}}/comments             - Add comment");
    info!("   DELETE /api/posts/{{id}}/comments/{{cid}}       - Delete comment");
    info!("   GET    /api/users/{{id}}/posts                - Posts by author");
    info!("   POST   /api/ai/suggestions                  - Writing suggestion");
    info!("   POST   /api/moderation/check                - Spam check");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
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
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
