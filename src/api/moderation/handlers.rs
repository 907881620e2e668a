use crate::api::models::*;
use crate::moderation;
use axum::Json;

/// Classify text without storing it
pub async fn check_handler(JsonBody(request): JsonBody<ModerationRequest>) -> Json<ModerationResponse> {
    let verdict = moderation::check(&request.content);

    Json(ModerationResponse {
        is_spam: verdict.is_spam(),
        signals: verdict.signals,
    })
}
