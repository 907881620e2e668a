use crate::api::comments::handlers::{add_comment_handler, delete_comment_handler};
use crate::api::models::AppState;
use axum::{
    routing::{delete, post},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/posts/{id}/comments", post(add_comment_handler))
        .route(
            "/api/posts/{id}/comments/{comment_id}",
            delete(delete_comment_handler),
        )
}
