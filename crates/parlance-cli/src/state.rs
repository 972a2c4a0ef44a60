//! Application state wiring all services together.
//!
//! AppState holds the database pool and loaded configuration. The session
//! orchestrator is generic over the repository trait, but the builder here
//! pins it to the concrete infra implementations.

use std::path::PathBuf;

use parlance_core::chat::session::SessionOrchestrator;
use parlance_core::llm::box_provider::BoxCompletionProvider;
use parlance_infra::config::load_chat_config;
use parlance_infra::llm::ollama::OllamaProvider;
use parlance_infra::sqlite::chat::SqliteChatRepository;
use parlance_infra::sqlite::pool::DatabasePool;
use parlance_types::config::ChatConfig;

/// Shared application state holding the pool and configuration.
pub struct AppState {
    pub config: ChatConfig,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: resolve the data directory, load
    /// config, connect to the database.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_chat_config(&data_dir).await;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("parlance.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        Ok(Self { config, db_pool })
    }

    /// Build a session orchestrator over this state's pool and config.
    pub fn orchestrator(&self) -> SessionOrchestrator<SqliteChatRepository> {
        let repo = SqliteChatRepository::new(self.db_pool.clone());
        let provider = BoxCompletionProvider::new(OllamaProvider::new(
            self.config.ollama_base_url.clone(),
            self.config.model.clone(),
        ));
        SessionOrchestrator::new(repo, provider, self.config.clone())
    }
}

/// Returns the data directory from the `PARLANCE_DATA_DIR` env var,
/// falling back to `~/.parlance`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PARLANCE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".parlance");
    }

    // Last resort: current directory
    PathBuf::from(".parlance")
}
