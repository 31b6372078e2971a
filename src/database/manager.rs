use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseConfig, StoreBackend};
use crate::database::memory::MemoryStore;
use crate::database::postgres::PgStore;
use crate::database::store::Store;

/// Errors from the store layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("{field} of '{name}' cannot be incremented past the integer limit")]
    CounterOverflow { field: &'static str, name: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Build the store client selected by configuration
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn Store>, DatabaseError> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let url = config
                .url
                .as_deref()
                .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
            let redacted = redact_url(url)?;

            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(Duration::from_secs(config.connection_timeout))
                .connect(url)
                .await?;
            info!("Created database pool for: {}", redacted);

            let store = PgStore::new(pool);
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
    }
}

/// Strip credentials from a connection string before it is logged
fn redact_url(raw: &str) -> Result<String, DatabaseError> {
    let mut url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
    if !url.username().is_empty() {
        url.set_username("***").map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
    }
    if url.password().is_some() {
        url.set_password(Some("***")).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
    }
    Ok(url.to_string())
}
