use crate::api::models::*;
use crate::suggestions::SuggestionKind;
use axum::{extract::State, Json};
use tracing::{debug, info};

pub async fn suggestion_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let kind = request.kind.as_deref().and_then(SuggestionKind::parse);

    // Unknown types get an empty suggestion, not an error
    let suggestion = match kind {
        Some(kind) => {
            info!(provider = state.suggester.name(), ?kind, "Generating suggestion");
            state
                .suggester
                .suggest(kind, request.prompt.as_deref().unwrap_or_default())
                .await
                .map_err(|e| AppError::Internal(format!("Suggestion failed: {}", e)))?
        }
        None => {
            debug!(kind = ?request.kind, "Unknown suggestion type");
            String::new()
        }
    };

    Ok(Json(SuggestionResponse {
        kind: request.kind,
        suggestion,
        used: false,
    }))
}
