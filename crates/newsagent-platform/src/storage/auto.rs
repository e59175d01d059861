//! Pick the storage backend named in the configuration.
//!
//! `auto` prefers the file backend and falls back to memory when the
//! directory cannot be used.

use std::sync::Arc;
use newsagent_core::ports::StoragePort;
use newsagent_types::{
    Result,
    config::{StorageBackendType, StorageConfig},
};
use super::{FileStorage, MemoryStorage};

/// Returns a trait object so callers are backend-agnostic.
pub async fn open_storage(config: &StorageConfig) -> Result<Arc<dyn StoragePort>> {
    match config.backend {
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackendType::File => {
            let storage = FileStorage::open(&config.path).await?;
            log::info!("Storage backend: file ({})", storage.root().display());
            Ok(Arc::new(storage))
        }
        StorageBackendType::Auto => match FileStorage::open(&config.path).await {
            Ok(storage) => {
                log::info!("Storage backend: file ({})", storage.root().display());
                Ok(Arc::new(storage))
            }
            Err(e) => {
                log::warn!("File storage unavailable ({}), falling back to memory", e);
                Ok(Arc::new(MemoryStorage::new()))
            }
        },
    }
}
