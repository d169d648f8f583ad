//! Canonical text form used for suggestion matching.

use unicode_normalization::UnicodeNormalization;

/// Normalize text for comparison: lowercase, NFD-decompose and drop combining
/// diacritical marks, then trim surrounding whitespace.
///
/// The index is built and queried through this one function, so an exact
/// lookup only works if both sides went through it.
///
/// - "Kehidupan Dunia " → "kehidupan dunia"
/// - "Mūsā" → "musa"
///
/// Inner whitespace is left alone: "a  b" stays "a  b".
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Combining Diacritical Marks block (U+0300..U+036F).
fn is_combining_diacritic(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}
