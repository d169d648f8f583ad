use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::{invalid_body, ApiError};
use crate::backend::transform::{build_search_response, SEARCH_TOP_K, SEARCH_TYPE};
use crate::backend::types::BackendSearchRequest;
use crate::models::{SearchRequest, SearchResponse};
use crate::state::AppState;
use crate::suggest::index::QuestionCatalog;

const INVALID_PROMPT: &str = "Invalid request. Please provide a valid prompt.";

/// POST /api/search - Verse search through the backend:
///   1. Health check on the backend
///   2. Backend search (translation, top 5) with the chosen encoder
///   3. Reshape results into the UI verse schema
///   4. Enrich related questions with phrasings and gold-standard verses
pub async fn search(
    State(state): State<AppState>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(req) = body.map_err(|e| invalid_body(e, INVALID_PROMPT))?;

    let prompt = req.prompt.unwrap_or_default();
    let query = prompt.trim();
    if query.is_empty() {
        return Err(ApiError::bad_request(INVALID_PROMPT));
    }

    let encoder = req
        .encoder
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| state.config.backend.default_encoder.clone());
    tracing::info!("Search request - query: {query:?}, encoder: {encoder}");

    // ── Backend exchange ─────────────────────────────────
    let backend_req = BackendSearchRequest {
        query,
        search_type: SEARCH_TYPE,
        top_k: SEARCH_TOP_K,
        encoder: &encoder,
    };
    let resp = state.backend.checked_search(&backend_req).await.map_err(|e| {
        if e.is_unavailable() {
            tracing::warn!("Search error: {e}");
        } else {
            tracing::error!("Search error: {e}");
        }
        ApiError::from(e)
    })?;

    if resp.encoder != encoder {
        tracing::warn!("Encoder changed from {encoder:?} to {:?}", resp.encoder);
    }

    // ── Related-question enrichment ──────────────────────
    let has_related = resp
        .related_questions
        .as_ref()
        .is_some_and(|qs| !qs.is_empty());

    let response = if has_related {
        let questions = state.questions.clone();
        let snapshot = tokio::task::spawn_blocking(move || questions.rebuild_if_stale())
            .await
            .map_err(|e| {
                tracing::error!("Question corpus load failed: {e}");
                ApiError::internal("Internal server error")
            })?;
        build_search_response(&prompt, resp, &snapshot.catalog, &state.reference)
    } else {
        build_search_response(&prompt, resp, &QuestionCatalog::default(), &state.reference)
    };

    tracing::debug!("Search returned {} verse(s)", response.results.len());
    Ok(Json(response))
}
