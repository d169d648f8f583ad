use std::collections::HashMap;

use serde::Serialize;

use super::normalize::normalize;

/// One phrasing (translation or paraphrase) of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionVariant {
    pub question_id: String,
    pub original_text: String,
    pub normalized_text: String,
    pub is_translation: bool,
}

impl QuestionVariant {
    pub fn new(question_id: impl Into<String>, text: impl Into<String>, is_translation: bool) -> Self {
        let original_text = text.into();
        Self {
            question_id: question_id.into(),
            normalized_text: normalize(&original_text),
            original_text,
            is_translation,
        }
    }
}

/// Variants grouped by normalized text.
///
/// Keys iterate in first-insertion order and each group keeps its variants in
/// insertion order, so scans over the index are deterministic.
#[derive(Debug, Default)]
pub struct NormalizedIndex {
    groups: Vec<(String, Vec<QuestionVariant>)>,
    positions: HashMap<String, usize>,
    variant_count: usize,
}

impl NormalizedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_variants(variants: impl IntoIterator<Item = QuestionVariant>) -> Self {
        let mut index = Self::new();
        for variant in variants {
            index.insert(variant);
        }
        index
    }

    /// Add a variant under its normalized key. Blank keys are ignored.
    pub fn insert(&mut self, variant: QuestionVariant) {
        if variant.normalized_text.is_empty() {
            return;
        }
        self.variant_count += 1;
        match self.positions.get(&variant.normalized_text) {
            Some(&pos) => self.groups[pos].1.push(variant),
            None => {
                let key = variant.normalized_text.clone();
                self.positions.insert(key.clone(), self.groups.len());
                self.groups.push((key, vec![variant]));
            }
        }
    }

    /// Variants whose normalized text is exactly `key`.
    pub fn get(&self, key: &str) -> Option<&[QuestionVariant]> {
        self.positions
            .get(key)
            .map(|&pos| self.groups[pos].1.as_slice())
    }

    /// `(normalized key, variants)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[QuestionVariant])> {
        self.groups
            .iter()
            .map(|(key, variants)| (key.as_str(), variants.as_slice()))
    }

    pub fn key_count(&self) -> usize {
        self.groups.len()
    }

    pub fn variant_count(&self) -> usize {
        self.variant_count
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Question id → reference-language (Arabic) question text.
#[derive(Debug, Default, Clone)]
pub struct ArabicQuestionIndex {
    questions: HashMap<String, String>,
}

impl ArabicQuestionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries for the same id replace earlier ones.
    pub fn insert(&mut self, question_id: impl Into<String>, text: impl Into<String>) {
        self.questions.insert(question_id.into(), text.into());
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.questions.get(question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl FromIterator<(String, String)> for ArabicQuestionIndex {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            questions: iter.into_iter().collect(),
        }
    }
}

/// All known phrasings of one question, deduplicated.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPhrasings {
    pub translations: Vec<String>,
    pub paraphrases: Vec<String>,
}

/// Question id → translations and paraphrases, used to enrich related
/// questions in search responses.
#[derive(Debug, Default)]
pub struct QuestionCatalog {
    entries: HashMap<String, QuestionPhrasings>,
}

impl QuestionCatalog {
    pub fn from_variants<'a>(variants: impl IntoIterator<Item = &'a QuestionVariant>) -> Self {
        let mut entries: HashMap<String, QuestionPhrasings> = HashMap::new();
        for v in variants {
            let entry = entries.entry(v.question_id.clone()).or_default();
            let bucket = if v.is_translation {
                &mut entry.translations
            } else {
                &mut entry.paraphrases
            };
            if !bucket.contains(&v.original_text) {
                bucket.push(v.original_text.clone());
            }
        }
        Self { entries }
    }

    pub fn get(&self, question_id: &str) -> Option<&QuestionPhrasings> {
        self.entries.get(question_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
