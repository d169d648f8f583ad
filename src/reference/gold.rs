use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::loader::read_optional;
use crate::suggest::corpus::SPLITS;

/// Question id → verse references judged relevant (`sura:aya` or
/// `sura:aya-aya`), in file order.
#[derive(Debug, Default, Clone)]
pub struct GoldStandard {
    refs: HashMap<String, Vec<String>>,
}

impl GoldStandard {
    /// qrels files for every split under `qrels_dir`.
    pub fn standard_files(qrels_dir: &Path) -> Vec<PathBuf> {
        SPLITS
            .iter()
            .map(|s| qrels_dir.join(format!("QQA23_TaskA_ayatec_v1.2_qrels_{s}.gold")))
            .collect()
    }

    /// Load and merge qrels files. Missing files are skipped.
    pub fn load(files: &[PathBuf]) -> Self {
        let mut gold = Self::default();
        for path in files {
            if let Some(content) = read_optional(path) {
                gold.extend_from_qrels(&content);
            }
        }
        tracing::info!("Gold standard loaded: {} question(s)", gold.len());
        gold
    }

    /// Accept `qid<TAB>iter<TAB>verse_ref<TAB>relevance` lines with relevance
    /// `1` and a real reference (not `-1`).
    pub fn extend_from_qrels(&mut self, content: &str) {
        for line in content.lines() {
            let fields: Vec<&str> = line.trim().split('\t').collect();
            if let [qid, _, verse_ref, "1"] = fields.as_slice() {
                if *verse_ref == "-1" {
                    continue;
                }
                self.refs
                    .entry(qid.to_string())
                    .or_default()
                    .push(verse_ref.to_string());
            }
        }
    }

    pub fn get(&self, question_id: &str) -> &[String] {
        self.refs
            .get(question_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}
