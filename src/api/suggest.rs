use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::{invalid_body, ApiError};
use crate::models::{SuggestRequest, SuggestResponse, Suggestion};
use crate::state::AppState;
use crate::suggest::SuggestError;

const INVALID_QUERY: &str = "Invalid request. Please provide a valid query.";

/// POST /api/suggest - Up to seven questions resembling the typed query
pub async fn suggest(
    State(state): State<AppState>,
    body: Result<Json<SuggestRequest>, JsonRejection>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let Json(req) = body.map_err(|e| invalid_body(e, INVALID_QUERY))?;

    let query = req.query.unwrap_or_default();
    if query.trim().is_empty() {
        return Err(ApiError::bad_request(INVALID_QUERY));
    }

    let questions = state.questions.clone();
    let matches = tokio::task::spawn_blocking(move || questions.suggest(&query))
        .await
        .map_err(|e| {
            tracing::error!("Suggestion task failed: {e}");
            ApiError::internal("Internal server error")
        })?
        .map_err(|e| match e {
            SuggestError::EmptyQuery => ApiError::bad_request(INVALID_QUERY),
        })?;

    let suggestions = matches
        .into_iter()
        .map(|m| Suggestion {
            qid: m.question_id,
            question: m.text,
            original_question: m.arabic_reference.clone(),
            word_similarity: m.score,
            arabic_question: m.arabic_reference,
        })
        .collect();

    Ok(Json(SuggestResponse { suggestions }))
}
