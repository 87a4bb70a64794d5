use std::sync::Arc;

use super::backend::ContainerBackend;
use super::backends::{FilesystemBackend, MemoryBackend};
use super::config::{StorageConfig, StorageType};
use super::error::ContainerResult;

/// Factory for creating container backends
pub struct BackendFactory;

impl BackendFactory {
    /// Create a container backend from a configuration.
    ///
    /// Only the memory and filesystem backends are config-driven. Backends
    /// over a vendor client (S3, Azure blob service, Swift, object_store) take
    /// a ready client and are constructed directly instead.
    ///
    /// # Arguments
    ///
    /// * `config` - The storage configuration specifying the backend type and options
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Arc<dyn ContainerBackend>)` - A thread-safe reference to the initialized backend
    /// * `Err(ContainerError)` - If the backend cannot be created
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * Required configuration options are missing
    /// * The filesystem root cannot be created
    pub async fn from_config(config: StorageConfig) -> ContainerResult<Arc<dyn ContainerBackend>> {
        let backend: Arc<dyn ContainerBackend> = match config.storage_type {
            StorageType::Memory => Arc::new(MemoryBackend::new()),
            StorageType::Filesystem => {
                let root = config.require_option("path")?;
                Arc::new(FilesystemBackend::local(root).await?)
            }
        };
        Ok(backend)
    }
}
