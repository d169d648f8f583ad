use std::sync::Arc;

use crate::backend::BackendClient;
use crate::config::Config;
use crate::reference::ReferenceData;
use crate::suggest::corpus::CorpusLayout;
use crate::suggest::QuestionRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub questions: Arc<QuestionRepository>,
    pub reference: Arc<ReferenceData>,
    pub backend: BackendClient,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        if !config.data_dir.exists() {
            tracing::warn!(
                "Data directory {} does not exist; suggestions and gold-standard data will be empty",
                config.data_dir.display()
            );
        }

        let questions = QuestionRepository::new(
            CorpusLayout::from_config(&config),
            config.suggest_cache_ttl(),
        );
        let reference = ReferenceData::load(&config);

        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(config.backend_timeout())
            .build()?;
        let backend = BackendClient::new(http_client, &config.backend);

        Ok(Self {
            config,
            questions: Arc::new(questions),
            reference: Arc::new(reference),
            backend,
        })
    }
}
