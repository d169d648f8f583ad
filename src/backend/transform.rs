//! Reshaping of backend replies into the UI verse schema.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::encoders::{cross_encoder_for, DETAIL_CROSS_ENCODER};
use super::types::{BackendRelatedQuestion, BackendSearchResponse, BackendVerse};
use crate::models::{
    QueryParameter, RelatedQuestion, RelevancyMetrics, SearchResponse, VerseReference,
    VerseResult,
};
use crate::reference::{surah_display_name, GoldStandard, ReferenceData, VerseTable};
use crate::suggest::index::QuestionCatalog;

/// Caption for the relevancy meter.
pub const RELEVANCE_SUMMARY: &str = "Tingkat relevansi pertanyaan dengan dataset gold standard";

/// Backend `search_type` for verse search.
pub const SEARCH_TYPE: &str = "translation";

/// Verses requested per search.
pub const SEARCH_TOP_K: usize = 5;

/// Leading verse number, e.g. `"12. "`.
static VERSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s*").expect("valid verse number pattern"));

/// Leading footnote marker, e.g. `"3) "`.
static FOOTNOTE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\)\s*").expect("valid footnote marker pattern"));

/// Drop a leading verse number: `"12. Dan"` → `"Dan"`.
pub fn strip_verse_number(text: &str) -> String {
    VERSE_NUMBER.replace(text, "").into_owned()
}

/// Drop the verse number (`"5. "`) and then a footnote marker (`"3) "`).
pub fn clean_translation(text: &str) -> String {
    let without_number = VERSE_NUMBER.replace(text, "");
    FOOTNOTE_MARKER.replace(&without_number, "").into_owned()
}

/// Trim and drop leading zeros: `" 007:1"` → `"7:1"`.
pub fn normalize_verse_id(verse_id: &str) -> String {
    verse_id.trim().trim_start_matches('0').to_string()
}

/// Parse a verse record embedded as single-quoted JSON (`{'sura': '2', ...}`).
/// Returns `None` if `text` is not such a record or does not parse.
pub fn parse_embedded_record(text: &str) -> Option<Map<String, Value>> {
    if !text.starts_with('{') {
        return None;
    }
    match serde_json::from_str(&text.replace('\'', "\"")) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!("Could not parse embedded verse record: {e}");
            None
        }
    }
}

/// Non-empty string or non-zero number field as text.
fn field_text(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Convert one ranked backend verse into the UI schema.
pub fn to_verse_result(verse: &BackendVerse, encoder: &str) -> VerseResult {
    let doc_id = verse.verse_id.clone().unwrap_or_default();
    let mut text = non_empty(&verse.translation)
        .or(non_empty(&verse.text))
        .unwrap_or_default()
        .to_string();
    let mut arabic_text = String::new();
    let mut translation = String::new();
    let mut verse_ref = doc_id.clone();

    if let Some(mut record) = parse_embedded_record(&text) {
        record.insert("id".to_string(), Value::String(doc_id.clone()));
        arabic_text = field_text(&record, "arabic_text").unwrap_or_default();
        translation = clean_translation(&field_text(&record, "translation").unwrap_or_default());
        if let (Some(sura), Some(aya)) = (field_text(&record, "sura"), field_text(&record, "aya")) {
            verse_ref = format!("{sura}:{aya}");
        }
        if let Ok(json) = serde_json::to_string(&record) {
            text = json.replace('"', "'");
        }
    }

    VerseResult {
        id_dokumen: doc_id.clone(),
        nomor_dokumen: doc_id,
        text,
        verse_ref,
        arabic_text,
        translation,
        bi_encoder: encoder.to_string(),
        cross_encoder: cross_encoder_for(encoder).to_string(),
        map_at_10: verse.search_score.unwrap_or(0.0),
        mrr: verse.rank_score.unwrap_or(0.0),
        skor_final: verse.final_score.unwrap_or(0.0),
    }
}

/// Gold-standard reference `sura:aya[-aya]` → display record. Ranges show
/// their first verse.
fn verse_reference(reference: &str, verses: &VerseTable) -> Option<VerseReference> {
    let (sura, ayas) = reference.split_once(':')?;
    let aya = ayas.split('-').next().unwrap_or(ayas);
    let verse = verses.get(sura, aya);

    Some(VerseReference {
        sura: sura.to_string(),
        surah_name: surah_display_name(sura),
        aya: aya.to_string(),
        arabic_text: verse.map(|v| v.arabic_text.clone()).unwrap_or_default(),
        translation: verse.map(|v| v.translation.clone()).unwrap_or_default(),
        relevance: 1.0,
    })
}

fn related_question(
    q: &BackendRelatedQuestion,
    catalog: &QuestionCatalog,
    gold: &GoldStandard,
    verses: &VerseTable,
) -> Option<RelatedQuestion> {
    let qid = q.qid.clone()?;
    let phrasings = catalog.get(&qid).cloned().unwrap_or_default();

    let arabic_question = non_empty(&q.arabic_question)
        .or(non_empty(&q.query))
        .or(non_empty(&q.question))
        .map(str::to_string);

    let verse_refs = gold
        .get(&qid)
        .iter()
        .filter_map(|r| verse_reference(r, verses))
        .collect();

    Some(RelatedQuestion {
        question: q.question.clone().unwrap_or_default(),
        similarity: q.similarity.unwrap_or(0.0),
        translations: phrasings.translations,
        paraphrases: phrasings.paraphrases,
        arabic_question,
        verse_refs,
        qid,
    })
}

/// Assemble the full search response for `prompt`.
pub fn build_search_response(
    prompt: &str,
    resp: BackendSearchResponse,
    catalog: &QuestionCatalog,
    reference: &ReferenceData,
) -> SearchResponse {
    let results = resp
        .results
        .iter()
        .map(|v| to_verse_result(v, &resp.encoder))
        .collect();

    let related = resp.related_questions.as_deref().unwrap_or_default();
    let related_questions = related
        .iter()
        .filter_map(|q| related_question(q, catalog, &reference.gold, &reference.verses))
        .collect();

    let gold_standard_refs = resp
        .related_questions
        .as_ref()
        .map(|qs| qs.iter().filter_map(|q| q.qid.clone()).collect());

    SearchResponse {
        results,
        query_words: prompt.split(' ').map(str::to_string).collect(),
        query_arabic: prompt.to_string(),
        query_parameter: QueryParameter {
            ringkasan: RELEVANCE_SUMMARY.to_string(),
            meter_relevancy: resp
                .relevancy_metrics
                .clone()
                .unwrap_or_else(RelevancyMetrics::fallback),
            related_questions,
        },
        question_type: non_empty(&resp.question_type)
            .unwrap_or("general")
            .to_string(),
        has_gold_standard: !related.is_empty(),
        gold_standard_refs,
        encoder: resp.encoder,
    }
}

/// Flat verse record for the detail view of `raw_verse_id`.
pub fn build_verse_detail(raw_verse_id: &str, encoder: &str, verse: &BackendVerse) -> VerseResult {
    let clean_id = raw_verse_id.split(':').next().unwrap_or_default().to_string();

    let payload = [&verse.translation, &verse.text]
        .into_iter()
        .flatten()
        .find(|t| t.starts_with('{'));
    let record = payload.and_then(|t| parse_embedded_record(t)).unwrap_or_default();

    let sura = field_text(&record, "sura").unwrap_or_default();
    let aya = field_text(&record, "aya").unwrap_or_default();
    let parsed_arabic = field_text(&record, "arabic_text").unwrap_or_default();
    let translation = strip_verse_number(&field_text(&record, "translation").unwrap_or_default());

    let text = format!(
        "{{'id':'{clean_id}','sura':'{sura}','aya':'{aya}','arabic_text':'{parsed_arabic}','translation':'{translation}','footnotes':''}}"
    );
    let verse_ref = if !sura.is_empty() && !aya.is_empty() {
        format!("{sura}:{aya}")
    } else {
        clean_id.clone()
    };
    let arabic_text = if parsed_arabic.is_empty() {
        verse.arabic_text.clone().unwrap_or_default()
    } else {
        parsed_arabic
    };

    VerseResult {
        id_dokumen: clean_id.clone(),
        nomor_dokumen: clean_id,
        text,
        verse_ref,
        arabic_text,
        translation,
        bi_encoder: encoder.to_string(),
        cross_encoder: DETAIL_CROSS_ENCODER.to_string(),
        map_at_10: nonzero_or_one(verse.search_score),
        mrr: nonzero_or_one(verse.rank_score),
        skor_final: nonzero_or_one(verse.final_score),
    }
}

fn nonzero_or_one(score: Option<f64>) -> f64 {
    score.filter(|s| *s != 0.0).unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::index::QuestionVariant;

    fn embedded(translation: &str) -> String {
        format!(
            "{{'id': '0', 'sura': '2', 'aya': '255', 'arabic_text': 'اللَّهُ لَا إِلَٰهَ', 'translation': '{translation}', 'footnotes': ''}}"
        )
    }

    #[test]
    fn test_strip_verse_number() {
        assert_eq!(strip_verse_number("255. Allah"), "Allah");
        assert_eq!(strip_verse_number("255.Allah"), "Allah");
        assert_eq!(strip_verse_number("Allah"), "Allah");
        assert_eq!(strip_verse_number("12 Allah"), "12 Allah");
        assert_eq!(strip_verse_number(". Allah"), ". Allah");
        assert_eq!(strip_verse_number("Allah 12. dan"), "Allah 12. dan");
        assert_eq!(strip_verse_number(""), "");
        // only the verse number, never the footnote marker
        assert_eq!(strip_verse_number("12)  catatan"), "12)  catatan");
    }

    #[test]
    fn test_clean_translation_strips_number_then_footnote() {
        assert_eq!(clean_translation("255. 7) Allah, tidak ada tuhan"), "Allah, tidak ada tuhan");
        assert_eq!(clean_translation("7) Allah"), "Allah");
        assert_eq!(clean_translation("12)  catatan"), "catatan");
        assert_eq!(clean_translation("Allah 7) dan"), "Allah 7) dan");
    }

    #[test]
    fn test_normalize_verse_id() {
        assert_eq!(normalize_verse_id(" 002:255 "), "2:255");
        assert_eq!(normalize_verse_id("17"), "17");
        assert_eq!(normalize_verse_id("000"), "");
    }

    #[test]
    fn test_verse_result_from_embedded_record() {
        let verse = BackendVerse {
            verse_id: Some("262".to_string()),
            translation: Some(embedded("255. Allah, tidak ada tuhan selain Dia")),
            search_score: Some(0.81),
            rank_score: Some(0.5),
            final_score: None,
            ..BackendVerse::default()
        };

        let v = to_verse_result(&verse, "msmarco-distilbert-base-tas-b");
        assert_eq!(v.id_dokumen, "262");
        assert_eq!(v.nomor_dokumen, "262");
        assert_eq!(v.verse_ref, "2:255");
        assert_eq!(v.arabic_text, "اللَّهُ لَا إِلَٰهَ");
        assert_eq!(v.translation, "Allah, tidak ada tuhan selain Dia");
        assert!(v.text.starts_with("{'id':'262','sura':'2'"));
        assert!(!v.text.contains('"'));
        assert_eq!(v.cross_encoder, "cross-encoder/ms-marco-MiniLM-L-6-v2");
        assert_eq!(v.map_at_10, 0.81);
        assert_eq!(v.skor_final, 0.0);
    }

    #[test]
    fn test_verse_result_plain_text_is_passed_through() {
        let verse = BackendVerse {
            verse_id: Some("2:255".to_string()),
            translation: Some(String::new()),
            text: Some("Allah, tidak ada tuhan selain Dia".to_string()),
            ..BackendVerse::default()
        };
        let v = to_verse_result(&verse, "unknown-encoder");
        assert_eq!(v.text, "Allah, tidak ada tuhan selain Dia");
        assert_eq!(v.verse_ref, "2:255");
        assert_eq!(v.translation, "");
        assert_eq!(v.cross_encoder, crate::backend::encoders::FALLBACK_CROSS_ENCODER);
    }

    #[test]
    fn test_unparseable_record_keeps_raw_text() {
        // The apostrophe in "Ali 'Imran" breaks the quote swap
        let raw = "{'translation': 'surah Ali 'Imran'}".to_string();
        let verse = BackendVerse {
            verse_id: Some("3:1".to_string()),
            translation: Some(raw.clone()),
            ..BackendVerse::default()
        };
        let v = to_verse_result(&verse, "e");
        assert_eq!(v.text, raw);
        assert_eq!(v.verse_ref, "3:1");
    }

    #[test]
    fn test_search_response_enriches_related_questions() {
        let resp: BackendSearchResponse = serde_json::from_value(serde_json::json!({
            "results": [],
            "encoder": "firqaaa/indo-sentence-bert-base",
            "related_questions": [
                {"qid": "2-1", "question": "ما هي آية الكرسي", "similarity": 0.9},
                {"qid": 5, "question": "q5", "query": "الاستعلام"}
            ]
        }))
        .unwrap();

        let variants = vec![
            QuestionVariant::new("2-1", "Apa itu ayat kursi?", true),
            QuestionVariant::new("2-1", "Jelaskan ayat kursi", false),
        ];
        let catalog = QuestionCatalog::from_variants(&variants);

        let mut reference = ReferenceData::default();
        reference
            .gold
            .extend_from_qrels("2-1\tQ0\t2:255-256\t1\n2-1\tQ0\t112:1\t1\n");
        reference.verses = [crate::reference::Verse {
            sura: Some("2".to_string()),
            aya: Some("255".to_string()),
            translation: "Allah, tidak ada tuhan selain Dia".to_string(),
            ..Default::default()
        }]
        .into_iter()
        .collect();

        let out = build_search_response("ayat kursi", resp, &catalog, &reference);

        assert_eq!(out.query_words, vec!["ayat", "kursi"]);
        assert_eq!(out.query_arabic, "ayat kursi");
        assert_eq!(out.question_type, "general");
        assert!(out.has_gold_standard);
        assert_eq!(
            out.gold_standard_refs,
            Some(vec!["2-1".to_string(), "5".to_string()])
        );
        assert_eq!(out.query_parameter.meter_relevancy, RelevancyMetrics::fallback());
        assert_eq!(out.query_parameter.ringkasan, RELEVANCE_SUMMARY);

        let first = &out.query_parameter.related_questions[0];
        assert_eq!(first.translations, vec!["Apa itu ayat kursi?"]);
        assert_eq!(first.paraphrases, vec!["Jelaskan ayat kursi"]);
        assert_eq!(first.arabic_question.as_deref(), Some("ما هي آية الكرسي"));
        assert_eq!(first.verse_refs.len(), 2);
        assert_eq!(first.verse_refs[0].aya, "255");
        assert_eq!(first.verse_refs[0].surah_name, "Al-Baqarah");
        assert_eq!(first.verse_refs[0].translation, "Allah, tidak ada tuhan selain Dia");
        assert_eq!(first.verse_refs[1].surah_name, "Al-Ikhlas");
        assert_eq!(first.verse_refs[1].translation, "");

        let second = &out.query_parameter.related_questions[1];
        assert_eq!(second.qid, "5");
        assert_eq!(second.arabic_question.as_deref(), Some("الاستعلام"));
        assert!(second.translations.is_empty());
        assert_eq!(second.similarity, 0.0);
    }

    #[test]
    fn test_search_response_without_related_questions() {
        let resp = BackendSearchResponse {
            encoder: "e".to_string(),
            question_type: Some("who".to_string()),
            ..BackendSearchResponse::default()
        };
        let out = build_search_response(
            "siapa",
            resp,
            &QuestionCatalog::default(),
            &ReferenceData::default(),
        );
        assert!(!out.has_gold_standard);
        assert!(out.gold_standard_refs.is_none());
        assert_eq!(out.question_type, "who");
    }

    #[test]
    fn test_verse_detail_from_text_payload() {
        let verse = BackendVerse {
            verse_id: Some("2:255".to_string()),
            arabic_text: Some("fallback".to_string()),
            translation: Some("plain".to_string()),
            text: Some(embedded("255. Allah")),
            search_score: Some(0.0),
            rank_score: Some(0.4),
            final_score: None,
        };
        let v = build_verse_detail("262:x", "enc", &verse);
        assert_eq!(v.id_dokumen, "262");
        assert_eq!(v.verse_ref, "2:255");
        assert_eq!(v.translation, "Allah");
        assert_eq!(v.arabic_text, "اللَّهُ لَا إِلَٰهَ");
        assert_eq!(
            v.text,
            "{'id':'262','sura':'2','aya':'255','arabic_text':'اللَّهُ لَا إِلَٰهَ','translation':'Allah','footnotes':''}"
        );
        assert_eq!(v.cross_encoder, DETAIL_CROSS_ENCODER);
        assert_eq!(v.map_at_10, 1.0);
        assert_eq!(v.mrr, 0.4);
        assert_eq!(v.skor_final, 1.0);
    }

    #[test]
    fn test_verse_detail_without_payload_uses_id() {
        let verse = BackendVerse {
            arabic_text: Some("نص".to_string()),
            ..BackendVerse::default()
        };
        let v = build_verse_detail("17", "enc", &verse);
        assert_eq!(v.verse_ref, "17");
        assert_eq!(v.arabic_text, "نص");
        assert_eq!(v.translation, "");
    }
}
