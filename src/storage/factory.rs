//! 存储工厂模块
//!
//! 根据配置创建相应的患者存储实例。

use crate::config::config::{DatabaseConfig, StoreBackend};
use crate::error::{AppError, Result};
use crate::storage::memory::InMemoryPatientStore;
use crate::storage::repository::PatientStore;
use std::sync::Arc;

#[cfg(feature = "surrealdb")]
use crate::storage::{repository::SurrealPatientStore, surrealdb::SurrealPool};

/// 存储工厂
pub struct StorageFactory;

impl StorageFactory {
    /// 根据配置创建存储实例
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn PatientStore>> {
        match config.backend {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory patient store; data is not persisted");
                Ok(Arc::new(InMemoryPatientStore::new()))
            }
            #[cfg(feature = "surrealdb")]
            StoreBackend::Surrealdb => {
                let pool = SurrealPool::new(config)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                pool.health_check().await?;
                tracing::info!(
                    "Connected to SurrealDB at {} ({}/{})",
                    config.url,
                    config.namespace,
                    config.database
                );
                Ok(Arc::new(SurrealPatientStore::new(&pool)))
            }
            #[cfg(not(feature = "surrealdb"))]
            StoreBackend::Surrealdb => Err(AppError::Config(
                "SurrealDB feature is not enabled. Enable 'surrealdb' feature or use the memory backend."
                    .into(),
            )),
        }
    }
}
