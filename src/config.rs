use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory holding the question corpora, qrels and verse table
    pub data_dir: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// Retrieval backend configuration
    pub backend: BackendConfig,
    /// Suggestion corpus cache lifetime in seconds
    pub suggest_cache_ttl_secs: u64,
}

/// Configuration for the external Python search/rank server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL (e.g. "http://localhost:8001")
    pub base_url: String,
    /// Budget for one health check + search exchange, in seconds
    pub timeout_secs: u64,
    /// Encoder used when the request does not name one
    pub default_encoder: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            timeout_secs: 30,
            default_encoder: "firqaaa/indo-sentence-bert-base".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: "127.0.0.1:3000".to_string(),
            backend: BackendConfig::default(),
            suggest_cache_ttl_secs: 60 * 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("AYAT_SEARCH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(addr) = std::env::var("AYAT_SEARCH_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(url) = std::env::var("BACKEND_URL") {
            config.backend.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(val) = std::env::var("BACKEND_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.backend.timeout_secs = v;
            }
        }
        if let Ok(encoder) = std::env::var("BACKEND_DEFAULT_ENCODER") {
            config.backend.default_encoder = encoder;
        }
        if let Ok(val) = std::env::var("SUGGEST_CACHE_TTL_SECS") {
            if let Ok(v) = val.parse() {
                config.suggest_cache_ttl_secs = v;
            }
        }

        config
    }

    /// Translated and paraphrased question corpora.
    pub fn question_data_dir(&self) -> PathBuf {
        self.data_dir.join("quran_data")
    }

    /// QQA23 Task-A data (question TSVs).
    pub fn qa_data_dir(&self) -> PathBuf {
        self.data_dir.join("quran-qa-2023").join("Task-A").join("data")
    }

    /// Gold-standard relevance judgments.
    pub fn qrels_dir(&self) -> PathBuf {
        self.qa_data_dir().join("qrels")
    }

    pub fn verse_table_path(&self) -> PathBuf {
        self.data_dir.join("quran_terjemahan_indonesia.jsonl")
    }

    pub fn suggest_cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.suggest_cache_ttl_secs.min(i64::MAX as u64) as i64)
    }

    pub fn backend_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.backend.timeout_secs)
    }
}
