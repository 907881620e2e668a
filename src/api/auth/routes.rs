use crate::api::auth::handlers::{login_handler, signup_handler};
use crate::api::models::AppState;
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/signup", post(signup_handler))
}
