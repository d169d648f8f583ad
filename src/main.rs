use tracing_subscriber::EnvFilter;

use ayat_search::api;
use ayat_search::config::Config;
use ayat_search::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Data directory: {}", config.data_dir.display());
    tracing::info!("Search backend: {}", config.backend.base_url);

    let state = AppState::new(config.clone())?;

    // Warm the suggestion index so the first keystroke doesn't pay for it
    let questions = state.questions.clone();
    tokio::task::spawn_blocking(move || questions.rebuild_if_stale()).await?;

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
