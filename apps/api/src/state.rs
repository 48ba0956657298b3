use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::wardrobe::storage::ImageStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Object storage for wardrobe photos. S3/MinIO in production.
    pub images: Arc<dyn ImageStore>,
    pub llm: LlmClient,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// State with a pool that never connects and in-memory image storage.
    pub fn for_tests() -> Self {
        let config = Config::for_tests();
        let db = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(500))
            .connect_lazy(&config.database_url)
            .expect("lazy pool should build without connecting");
        let llm = LlmClient::new(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
        )
        .expect("http client should build");

        AppState {
            db,
            images: Arc::new(crate::wardrobe::storage::MemoryImageStore::default()),
            llm,
            config,
        }
    }
}
