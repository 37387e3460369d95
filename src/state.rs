use crate::config::{AppConfig, StoreBackend};
use crate::db;
use crate::users::{memory::InMemoryUserStore, repo::PgUserStore, repo::UserStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let store = match config.store {
            StoreBackend::Postgres => {
                let pool = db::connect(&config).await?;
                Arc::new(PgUserStore::new(pool)) as Arc<dyn UserStore>
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory user store; data is lost on exit");
                Arc::new(InMemoryUserStore::default()) as Arc<dyn UserStore>
            }
        };

        Ok(Self::from_parts(Arc::new(config), store))
    }

    pub fn from_parts(config: Arc<AppConfig>, store: Arc<dyn UserStore>) -> Self {
        Self { config, store }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::from_parts(
            Arc::new(AppConfig::in_memory()),
            Arc::new(InMemoryUserStore::default()),
        )
    }
}
