//! Reference data used to enrich search responses: gold-standard relevance
//! judgments, the verse translation table and surah names.

pub mod gold;
pub mod surah;
pub mod verses;

pub use gold::GoldStandard;
pub use surah::{surah_display_name, surah_name};
pub use verses::{Verse, VerseTable};

use crate::config::Config;

/// Loaded once at startup and kept for the process lifetime.
#[derive(Debug, Default, Clone)]
pub struct ReferenceData {
    pub gold: GoldStandard,
    pub verses: VerseTable,
}

impl ReferenceData {
    pub fn load(config: &Config) -> Self {
        Self {
            gold: GoldStandard::load(&GoldStandard::standard_files(&config.qrels_dir())),
            verses: VerseTable::load(&config.verse_table_path()),
        }
    }
}
