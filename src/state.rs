use std::sync::Arc;
use tower_sessions::cookie::Key;

use crate::api::csrf::derive_session_key;
use crate::config::Config;
use crate::db::Store;
use crate::services::{CafeService, SeaOrmCafeService};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub cafe_service: Arc<dyn CafeService>,

    /// Signs session cookies; derived from `security.secret_key`.
    pub session_key: Key,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let session_key = derive_session_key(&config.security.secret_key)?;

        let cafe_service = Arc::new(SeaOrmCafeService::new(
            store.clone(),
            config.security.api_key.clone(),
        )) as Arc<dyn CafeService + Send + Sync + 'static>;

        Ok(Self {
            config: Arc::new(config),
            store,
            cafe_service,
            session_key,
        })
    }
}
