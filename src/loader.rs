//! Forgiving readers for the static data files.
//!
//! A missing or unreadable file yields nothing and a bad line is skipped on its
//! own; neither is reported to the caller as an error.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Read a whole file, or `None` (with a warning) if it cannot be read.
pub fn read_optional(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("File not found: {}", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {e}", path.display());
            None
        }
    }
}

/// Parse every non-blank line of a JSONL file as `T`, skipping lines that fail.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let Some(content) = read_optional(path) else {
        return Vec::new();
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                tracing::debug!("{}:{}: skipping malformed line: {e}", path.display(), lineno + 1);
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(
            "Skipped {skipped} malformed line(s) in {}",
            path.display()
        );
    }
    tracing::debug!("Loaded {} record(s) from {}", records.len(), path.display());

    records
}

/// Accept a JSON string or number and keep it as a string.
/// `null` and other shapes become `None`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
        Other(serde_json::Value),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => Some(s),
        Raw::Num(n) => Some(n.to_string()),
        Raw::Other(_) => None,
    })
}
