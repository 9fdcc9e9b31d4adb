use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;

/// Process-wide shared resources: configuration and the database pool.
/// Built once at startup; dropping it tears the pool down.
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,
    pub store: Store,
}

impl SharedState {
    pub async fn new(config: Config) -> Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
        })
    }
}
