use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::loader::{lenient_string, read_jsonl};

/// One verse of the Indonesian translation table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Verse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sura: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub aya: Option<String>,
    #[serde(default)]
    pub arabic_text: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub footnotes: String,
}

/// `sura:aya` → verse.
#[derive(Debug, Default, Clone)]
pub struct VerseTable {
    verses: HashMap<String, Verse>,
}

impl VerseTable {
    /// Load from a JSONL file. Lines without both `sura` and `aya` are dropped.
    pub fn load(path: &Path) -> Self {
        let table: Self = read_jsonl::<Verse>(path).into_iter().collect();
        tracing::info!("Verse table loaded: {} verse(s)", table.len());
        table
    }

    pub fn get(&self, sura: &str, aya: &str) -> Option<&Verse> {
        self.verses.get(&format!("{sura}:{aya}"))
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

impl FromIterator<Verse> for VerseTable {
    fn from_iter<I: IntoIterator<Item = Verse>>(iter: I) -> Self {
        let verses = iter
            .into_iter()
            .filter_map(|v| {
                let key = format!("{}:{}", v.sura.as_deref()?, v.aya.as_deref()?);
                Some((key, v))
            })
            .collect();
        Self { verses }
    }
}
