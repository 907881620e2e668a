use crate::api::models::*;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn add_comment_handler(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    JsonBody(request): JsonBody<CreateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    let post_id = parse_object_id(&post_id)?;
    let comment = state.blog.add_comment(post_id, request.into()).await?;
    Ok(Json(comment.into()))
}

/// Deleting a comment that is already gone still succeeds
pub async fn delete_comment_handler(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, AppError> {
    let post_id = parse_object_id(&post_id)?;
    let comment_id = parse_object_id(&comment_id)?;

    state.blog.delete_comment(post_id, comment_id).await?;

    Ok(Json(MessageResponse::new("Comment deleted successfully")))
}
