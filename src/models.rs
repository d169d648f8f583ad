use serde::{Deserialize, Serialize};

use crate::loader::lenient_string;

/// Suggestion request
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// A single suggestion as the UI expects it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub qid: String,
    pub question: String,
    #[serde(rename = "originalQuestion")]
    pub original_question: String,
    #[serde(rename = "wordSimilarity")]
    pub word_similarity: f64,
    pub arabic_question: String,
}

/// Suggestion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Search request
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub encoder: Option<String>,
}

/// Verse-detail request
#[derive(Debug, Clone, Deserialize)]
pub struct ShowRequest {
    #[serde(rename = "verseId", default, deserialize_with = "lenient_string")]
    pub verse_id: Option<String>,
    #[serde(default)]
    pub encoder: Option<String>,
}

/// A verse in the UI schema. Shared by search results and verse detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerseResult {
    pub id_dokumen: String,
    pub nomor_dokumen: String,
    /// Single-quoted JSON rendering of the verse record
    pub text: String,
    pub verse_ref: String,
    pub arabic_text: String,
    pub translation: String,
    #[serde(rename = "bi-encoder")]
    pub bi_encoder: String,
    #[serde(rename = "cross-encoder")]
    pub cross_encoder: String,
    #[serde(rename = "map@10")]
    pub map_at_10: f64,
    pub mrr: f64,
    pub skor_final: f64,
}

/// Share of high / medium / low relevance judgments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelevancyMetrics {
    #[serde(default)]
    pub high: f64,
    #[serde(default)]
    pub medium: f64,
    #[serde(default)]
    pub low: f64,
}

impl RelevancyMetrics {
    /// Shown when the backend does not report metrics.
    pub fn fallback() -> Self {
        Self {
            high: 0.3,
            medium: 0.5,
            low: 0.2,
        }
    }
}

/// A gold-standard verse attached to a related question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerseReference {
    pub sura: String,
    pub surah_name: String,
    pub aya: String,
    pub arabic_text: String,
    pub translation: String,
    pub relevance: f64,
}

/// A question from the evaluation set that resembles the query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelatedQuestion {
    pub qid: String,
    pub question: String,
    pub similarity: f64,
    pub translations: Vec<String>,
    pub paraphrases: Vec<String>,
    pub arabic_question: Option<String>,
    pub verse_refs: Vec<VerseReference>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryParameter {
    pub ringkasan: String,
    pub meter_relevancy: RelevancyMetrics,
    pub related_questions: Vec<RelatedQuestion>,
}

/// Search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<VerseResult>,
    pub query_words: Vec<String>,
    pub query_arabic: String,
    pub query_parameter: QueryParameter,
    pub question_type: String,
    pub has_gold_standard: bool,
    pub gold_standard_refs: Option<Vec<String>>,
    pub encoder: String,
}
