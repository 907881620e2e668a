use crate::api::models::AppState;
use crate::api::moderation::handlers::check_handler;
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/moderation/check", post(check_handler))
}
