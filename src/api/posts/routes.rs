use crate::api::models::AppState;
use crate::api::posts::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(list_posts_handler).post(create_post_handler))
        .route(
            "/api/posts/{id}",
            get(get_post_handler)
                .put(update_post_handler)
                .delete(delete_post_handler),
        )
        .route("/api/posts/{id}/like", post(like_post_handler))
        .route("/api/users/{id}/posts", get(author_posts_handler))
}
