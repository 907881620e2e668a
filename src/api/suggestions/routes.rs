use crate::api::models::AppState;
use crate::api::suggestions::handlers::suggestion_handler;
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/ai/suggestions", post(suggestion_handler))
}
