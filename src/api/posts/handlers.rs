use crate::api::models::*;
use crate::storage::PostPatch;
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

pub async fn list_posts_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = state.blog.list_posts().await?;

    info!(count = posts.len(), "Listed posts");

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let id = parse_object_id(&id)?;
    let post = state.blog.get_post(id).await?;
    Ok(Json(post.into()))
}

pub async fn create_post_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let post = state.blog.create_post(request.into()).await?;
    Ok(Json(post.into()))
}

pub async fn update_post_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let id = parse_object_id(&id)?;
    let patch = PostPatch::from(request);
    let post = state.blog.update_post(id, &patch).await?;
    Ok(Json(post.into()))
}

pub async fn delete_post_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;
    state.blog.delete_post(id).await?;
    Ok(Json(MessageResponse::new("Post deleted successfully")))
}

pub async fn like_post_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LikesResponse>, AppError> {
    let id = parse_object_id(&id)?;
    let likes = state.blog.like_post(id).await?;

    info!(post_id = %id, likes, "Post liked");

    Ok(Json(LikesResponse { likes }))
}

/// Posts written by one author; the id is matched as stored, not parsed
pub async fn author_posts_handler(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = state.blog.list_posts_by_author(&author_id).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}
