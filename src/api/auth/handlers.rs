use crate::api::models::*;
use axum::{extract::State, Json};
use tracing::info;

pub async fn login_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .blog
        .authenticate(&request.email, &request.password)
        .await?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(user.into()))
}

pub async fn signup_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .blog
        .create_user(&request.name, &request.email, &request.password)
        .await?;

    Ok(Json(user.into()))
}
