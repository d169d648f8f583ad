use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::{invalid_body, ApiError};
use crate::backend::transform::{build_verse_detail, normalize_verse_id, SEARCH_TYPE};
use crate::backend::types::BackendSearchRequest;
use crate::models::{ShowRequest, VerseResult};
use crate::state::AppState;

const VERSE_ID_REQUIRED: &str = "ID Ayat diperlukan";
const VERSE_NOT_FOUND: &str = "Ayat tidak ditemukan";
const DETAIL_FAILED: &str = "Terjadi kesalahan saat memuat detail ayat";

/// POST /api/show - Detail record for a single verse
pub async fn show(
    State(state): State<AppState>,
    body: Result<Json<ShowRequest>, JsonRejection>,
) -> Result<Json<VerseResult>, ApiError> {
    let Json(req) = body.map_err(|e| invalid_body(e, VERSE_ID_REQUIRED))?;

    let raw_id = req.verse_id.unwrap_or_default();
    if raw_id.trim().is_empty() {
        return Err(ApiError::bad_request(VERSE_ID_REQUIRED));
    }
    // "0" and "000" normalize to "" and are still passed through
    let verse_id = normalize_verse_id(&raw_id);

    let encoder = req
        .encoder
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| state.config.backend.default_encoder.clone());
    tracing::info!("Fetching details for verse {verse_id} (original: {raw_id:?}), encoder: {encoder}");

    let query = format!("verse:{verse_id}");
    let backend_req = BackendSearchRequest {
        query: &query,
        search_type: SEARCH_TYPE,
        top_k: 1,
        encoder: &encoder,
    };
    let resp = state.backend.checked_search(&backend_req).await.map_err(|e| {
        if e.is_unavailable() {
            tracing::warn!("Verse detail error: {e}");
        } else {
            tracing::error!("Verse detail error: {e}");
        }
        ApiError::from_backend(&e, Some(DETAIL_FAILED))
    })?;

    let Some(verse) = resp.results.first() else {
        return Err(ApiError::not_found(VERSE_NOT_FOUND));
    };

    Ok(Json(build_verse_detail(&raw_id, &encoder, verse)))
}
