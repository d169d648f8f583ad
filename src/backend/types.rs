//! Wire types for the Python search/rank server. Everything the backend sends
//! is coerced here; the rest of the crate only sees these structs.

use serde::{Deserialize, Serialize};

use crate::loader::lenient_string;
use crate::models::RelevancyMetrics;

/// Body of `POST /api/search`.
#[derive(Debug, Clone, Serialize)]
pub struct BackendSearchRequest<'a> {
    pub query: &'a str,
    pub search_type: &'a str,
    pub top_k: usize,
    pub encoder: &'a str,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendHealth {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub available_encoders: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendSearchResponse {
    #[serde(default)]
    pub results: Vec<BackendVerse>,
    #[serde(default)]
    pub encoder: String,
    #[serde(default)]
    pub question_type: Option<String>,
    #[serde(default)]
    pub relevancy_metrics: Option<RelevancyMetrics>,
    #[serde(default)]
    pub related_questions: Option<Vec<BackendRelatedQuestion>>,
}

/// One ranked verse. `translation`/`text` may hold a single-quoted JSON
/// object with the full verse record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendVerse {
    #[serde(default, alias = "id", deserialize_with = "lenient_string")]
    pub verse_id: Option<String>,
    #[serde(default)]
    pub arabic_text: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub search_score: Option<f64>,
    #[serde(default)]
    pub rank_score: Option<f64>,
    #[serde(default)]
    pub final_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendRelatedQuestion {
    #[serde(default, deserialize_with = "lenient_string")]
    pub qid: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub similarity: Option<f64>,
    #[serde(default)]
    pub arabic_question: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_tolerates_missing_and_null_fields() {
        let body = r#"{
            "results": [
                {"verse_id": "2:255", "arabic_text": "اللَّهُ", "translation": "Allah", "search_score": 0.8, "rank_score": 0.6, "final_score": 0.7, "ayatec_match": null},
                {"id": 17, "text": null}
            ],
            "query": "q",
            "search_type": "translation",
            "processing_time": 0.12,
            "encoder": "firqaaa/indo-sentence-bert-base",
            "related_questions": null
        }"#;
        let resp: BackendSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.results.len(), 2);
        assert_eq!(resp.results[0].verse_id.as_deref(), Some("2:255"));
        assert_eq!(resp.results[0].final_score, Some(0.7));
        assert_eq!(resp.results[1].verse_id.as_deref(), Some("17"));
        assert!(resp.results[1].text.is_none());
        assert!(resp.related_questions.is_none());
        assert!(resp.relevancy_metrics.is_none());
    }

    #[test]
    fn test_related_question_numeric_qid() {
        let q: BackendRelatedQuestion =
            serde_json::from_str(r#"{"qid": 42, "question": "ما", "similarity": 0.5}"#).unwrap();
        assert_eq!(q.qid.as_deref(), Some("42"));
        assert_eq!(q.similarity, Some(0.5));
    }

    #[test]
    fn test_health_without_encoder_list() {
        let h: BackendHealth =
            serde_json::from_str(r#"{"status": "ok", "service": "quran-search-rank"}"#).unwrap();
        assert_eq!(h.status.as_deref(), Some("ok"));
        assert!(h.available_encoders.is_empty());
    }
}
