//! Loading of the question corpora behind suggestions.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::index::{ArabicQuestionIndex, QuestionVariant};
use crate::config::Config;
use crate::loader::{lenient_string, read_jsonl, read_optional};

/// Dataset splits, in load order.
pub const SPLITS: [&str; 3] = ["dev", "test", "train"];

/// Where the corpus files live.
#[derive(Debug, Clone)]
pub struct CorpusLayout {
    pub translation_files: Vec<PathBuf>,
    pub paraphrase_files: Vec<PathBuf>,
    pub arabic_question_files: Vec<PathBuf>,
}

impl CorpusLayout {
    /// The standard file names under a data root.
    pub fn standard(question_dir: &Path, qa_dir: &Path) -> Self {
        Self {
            translation_files: SPLITS
                .iter()
                .map(|s| question_dir.join(format!("terjemahan_pertanyaan_claude_{s}_id.jsonl")))
                .collect(),
            paraphrase_files: SPLITS
                .iter()
                .map(|s| question_dir.join(format!("parafrasa_pertanyaan_gpt_{s}_id.jsonl")))
                .collect(),
            arabic_question_files: SPLITS
                .iter()
                .map(|s| qa_dir.join(format!("QQA23_TaskA_ayatec_v1.2_{s}.tsv")))
                .collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::standard(&config.question_data_dir(), &config.qa_data_dir())
    }
}

/// Everything read from disk for one snapshot.
#[derive(Debug, Default)]
pub struct Corpus {
    pub variants: Vec<QuestionVariant>,
    pub arabic: ArabicQuestionIndex,
}

#[derive(Deserialize)]
struct TranslationRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    qid: Option<String>,
    #[serde(default)]
    query_id: Option<String>,
}

#[derive(Deserialize)]
struct ParaphraseRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    qid: Option<String>,
    #[serde(default)]
    query_versions: Option<Vec<String>>,
}

impl Corpus {
    /// Read all corpus files. Never fails: missing files and bad lines
    /// simply contribute nothing.
    pub fn load(layout: &CorpusLayout) -> Self {
        let mut variants = Vec::new();

        for path in &layout.translation_files {
            let before = variants.len();
            for record in read_jsonl::<TranslationRecord>(path) {
                let (Some(qid), Some(text)) = (non_empty(record.qid), record.query_id) else {
                    continue;
                };
                variants.push(QuestionVariant::new(qid, text, true));
            }
            tracing::debug!(
                "{} translation variant(s) from {}",
                variants.len() - before,
                path.display()
            );
        }

        for path in &layout.paraphrase_files {
            let before = variants.len();
            for record in read_jsonl::<ParaphraseRecord>(path) {
                let (Some(qid), Some(versions)) = (non_empty(record.qid), record.query_versions)
                else {
                    continue;
                };
                for version in versions {
                    variants.push(QuestionVariant::new(qid.clone(), version, false));
                }
            }
            tracing::debug!(
                "{} paraphrase variant(s) from {}",
                variants.len() - before,
                path.display()
            );
        }

        let mut arabic = ArabicQuestionIndex::new();
        for path in &layout.arabic_question_files {
            if let Some(content) = read_optional(path) {
                for (qid, question) in parse_question_tsv(&content) {
                    arabic.insert(qid, question);
                }
            }
        }

        tracing::info!(
            "Question corpus loaded: {} variant(s), {} reference question(s)",
            variants.len(),
            arabic.len()
        );

        Self { variants, arabic }
    }
}

/// Parse `qid<TAB>question...` lines. Extra fields are joined with a space.
pub fn parse_question_tsv(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let qid = fields.next()?.trim();
            let rest: Vec<&str> = fields.collect();
            if qid.is_empty() || rest.is_empty() {
                return None;
            }
            Some((qid.to_string(), rest.join(" ").trim().to_string()))
        })
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_in(dir: &Path) -> CorpusLayout {
        CorpusLayout::standard(&dir.join("quran_data"), &dir.join("qa"))
    }

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_standard_layout_names() {
        let layout = layout_in(Path::new("/d"));
        assert_eq!(
            layout.translation_files[0],
            PathBuf::from("/d/quran_data/terjemahan_pertanyaan_claude_dev_id.jsonl")
        );
        assert_eq!(
            layout.paraphrase_files[2],
            PathBuf::from("/d/quran_data/parafrasa_pertanyaan_gpt_train_id.jsonl")
        );
        assert_eq!(
            layout.arabic_question_files[1],
            PathBuf::from("/d/qa/QQA23_TaskA_ayatec_v1.2_test.tsv")
        );
    }

    #[test]
    fn test_load_reads_translations_paraphrases_and_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        write(
            &layout.translation_files[0],
            "{\"qid\": \"Q1\", \"query\": \"ما الحياة الدنيا\", \"query_id\": \"Apa itu kehidupan dunia?\"}\n\
             {\"qid\": 7, \"query_id\": \"Siapa Nabi Musa?\"}\n",
        );
        write(
            &layout.paraphrase_files[1],
            "{\"qid\": \"Q1\", \"query_versions\": [\"Apa makna hidup di dunia?\", \"Jelaskan kehidupan dunia\"]}\n",
        );
        write(
            &layout.arabic_question_files[2],
            "Q1\tما هي الحياة\tالدنيا\n7\tمن هو موسى\n\nbroken-line\n",
        );

        let corpus = Corpus::load(&layout);

        assert_eq!(corpus.variants.len(), 4);
        assert!(corpus.variants[0].is_translation);
        assert_eq!(corpus.variants[1].question_id, "7");
        assert!(!corpus.variants[2].is_translation);
        assert_eq!(corpus.variants[3].original_text, "Jelaskan kehidupan dunia");

        assert_eq!(corpus.arabic.get("Q1"), Some("ما هي الحياة الدنيا"));
        assert_eq!(corpus.arabic.get("7"), Some("من هو موسى"));
        assert_eq!(corpus.arabic.len(), 2);
    }

    #[test]
    fn test_missing_files_contribute_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        // Only the train paraphrases exist
        write(
            &layout.paraphrase_files[2],
            "{\"qid\": \"Q9\", \"query_versions\": [\"Apa itu zakat?\"]}\n",
        );

        let corpus = Corpus::load(&layout);
        assert_eq!(corpus.variants.len(), 1);
        assert_eq!(corpus.variants[0].question_id, "Q9");
        assert!(corpus.arabic.is_empty());
    }

    #[test]
    fn test_records_without_qid_or_text_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        write(
            &layout.translation_files[0],
            "{\"qid\": \"\", \"query_id\": \"tanpa id\"}\n\
             {\"qid\": \"Q2\"}\n\
             {\"query_id\": \"juga tanpa id\"}\n\
             {\"qid\": \"Q3\", \"query_id\": \"Apa itu iman?\"}\n\
             not-json\n",
        );
        write(
            &layout.paraphrase_files[0],
            "{\"qid\": \"Q4\", \"query_versions\": \"not a list\"}\n",
        );

        let corpus = Corpus::load(&layout);
        assert_eq!(corpus.variants.len(), 1);
        assert_eq!(corpus.variants[0].question_id, "Q3");
    }

    #[test]
    fn test_parse_question_tsv_trims_and_joins() {
        let rows = parse_question_tsv("1\t  a\tb  \n\t x\n2\n");
        assert_eq!(rows, vec![("1".to_string(), "a b".to_string())]);
    }
}
