pub mod auth;
pub mod comments;
pub mod models;
pub mod moderation;
pub mod posts;
pub mod suggestions;

// Re-exports
pub use models::*;

use axum::{extract::State, routing::get, Json, Router};

pub async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let total_posts = state.blog.count_posts().await?;
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        total_posts,
    }))
}

/// All routes, state applied
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(auth::routes())
        .merge(posts::routes())
        .merge(comments::routes())
        .merge(suggestions::routes())
        .merge(moderation::routes())
        .with_state(state)
}
