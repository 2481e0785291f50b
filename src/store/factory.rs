//! Backend selection for the entity store.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use crate::config::DatabaseConfig;

use super::{EntityStore, MemoryStore, PostgresStore, StoreError};

/// Create an entity store from configuration.
///
/// `database.backend` selects the implementation: "postgres" connects a
/// pool against `database.url`; anything else falls back to the in-memory
/// store with a warning for unrecognized values.
pub async fn create_entity_store(
    config: &DatabaseConfig,
) -> Result<Arc<dyn EntityStore>, StoreError> {
    match config.backend.as_str() {
        "postgres" => {
            let pool = PgPoolOptions::new()
                .max_connections(config.pool_size)
                .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
                .connect(&config.url)
                .await?;

            tracing::info!(
                pool_size = config.pool_size,
                "Using PostgreSQL entity store"
            );

            Ok(Arc::new(PostgresStore::new(pool)))
        }
        "memory" => {
            tracing::info!("Using in-memory entity store");
            Ok(Arc::new(MemoryStore::new()))
        }
        other => {
            tracing::warn!(
                backend = %other,
                "Unknown store backend, falling back to memory"
            );
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
