//! Storage port implementations

pub mod memory;
pub mod postgres;

pub use memory::InMemoryMeterReadingStore;
pub use postgres::PgMeterReadingStore;

use crate::pool::{create_pool, run_migrations};
use meter_core::config::StorageBackend;
use meter_core::traits::MeterReadingStore;
use meter_core::{AppConfig, AppResult};
use std::sync::Arc;
use tracing::{info, warn};

/// Build the storage port selected by `storage.backend`
///
/// The postgres backend connects and, when enabled, applies migrations.
/// The memory backend starts with the meters listed in `storage.seed_meters`.
pub async fn open_store(config: &AppConfig) -> AppResult<Arc<dyn MeterReadingStore>> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&config.database).await?;

            if config.database.run_migrations {
                run_migrations(&pool).await?;
            }

            Ok(Arc::new(PgMeterReadingStore::new(pool)))
        }
        StorageBackend::Memory => {
            let meters = &config.storage.seed_meters;
            if meters.is_empty() {
                warn!("In-memory storage has no meters; set storage.seed_meters");
            }
            warn!(
                meters = meters.len(),
                "Using in-memory storage; readings are lost on shutdown"
            );
            Ok(Arc::new(InMemoryMeterReadingStore::with_meters(
                meters.iter().copied(),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meter_core::config::StorageConfig;
    use meter_core::models::MeterReading;

    fn memory_config(seed_meters: Vec<i64>) -> AppConfig {
        AppConfig {
            server: Default::default(),
            database: Default::default(),
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                seed_meters,
            },
        }
    }

    #[tokio::test]
    async fn test_memory_store_accepts_seeded_meters() {
        let store = open_store(&memory_config(vec![1, 2])).await.unwrap();

        assert!(store.exists_meter(1).await.unwrap());
        assert!(store.exists_meter(2).await.unwrap());
        assert!(!store.exists_meter(3).await.unwrap());

        let saved = store.save(MeterReading::new(1, 2020, 1, 11)).await.unwrap();
        assert!(saved.id.is_some());
        assert_eq!(store.sum_consumption(1, 2020).await.unwrap(), Some(11));
    }

    #[tokio::test]
    async fn test_memory_store_without_seed_has_no_meters() {
        let store = open_store(&memory_config(Vec::new())).await.unwrap();

        assert!(!store.exists_meter(1).await.unwrap());
        assert!(store.save(MeterReading::new(1, 2020, 1, 11)).await.is_err());
    }

    #[tokio::test]
    async fn test_postgres_without_url_is_config_error() {
        let config = AppConfig {
            server: Default::default(),
            database: Default::default(),
            storage: StorageConfig::default(),
        };

        let err = open_store(&config).await.err().unwrap();
        assert!(matches!(err, meter_core::AppError::Config(_)));
    }
}
