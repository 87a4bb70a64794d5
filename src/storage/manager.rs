// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;
use tracing::{debug, warn};

use super::backend::ContainerBackend;
use super::config::StorageConfig;
use super::container::{BackendKind, Container};
use super::error::{translate, BackendError, ContainerError, ContainerResult};
use super::factory::BackendFactory;
use super::name::validate_container_name;

/// Builder for constructing a `ContainerManager` from a storage configuration.
///
/// # Examples
///
/// ```no_run
/// use cloud_containers::storage::{ContainerManager, StorageConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
/// let config = StorageConfig::filesystem().with_option("path", "/var/lib/containers");
///
/// let manager = ContainerManager::builder(config).build().await?;
/// manager.create("images").await?;
/// # Ok(())
/// # }
/// ```
pub struct ContainerManagerBuilder {
    config: StorageConfig,
}

impl ContainerManagerBuilder {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Builds the `ContainerManager` instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be created from the
    /// configuration (missing options, unreachable root, bad credentials
    /// format).
    pub async fn build(self) -> ContainerResult<ContainerManager> {
        let backend = BackendFactory::from_config(self.config).await?;
        Ok(ContainerManager::new(backend))
    }
}

/// Uniform container operations over one bound backend.
///
/// Every name is checked with [`validate_container_name`] before it reaches
/// the backend, whichever backend is bound, and every backend
/// failure is translated into a [`ContainerError`] on the way out. A missing
/// container is reported as `Ok(None)` by [`get`](Self::get) and ignored by
/// [`delete`](Self::delete).
///
/// Cloning is cheap and clones share the backend.
#[derive(Clone)]
pub struct ContainerManager {
    backend: Arc<dyn ContainerBackend>,
}

impl ContainerManager {
    /// Bind a manager to an already constructed backend.
    pub fn new(backend: Arc<dyn ContainerBackend>) -> Self {
        Self { backend }
    }

    /// Creates a new `ContainerManagerBuilder` for a config-driven backend.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloud_containers::storage::{ContainerManager, StorageConfig};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    /// let manager = ContainerManager::builder(StorageConfig::memory())
    ///     .build()
    ///     .await?;
    /// assert!(manager.list().await?.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder(config: StorageConfig) -> ContainerManagerBuilder {
        ContainerManagerBuilder::new(config)
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// List every container visible to the backend, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn list(&self) -> ContainerResult<Vec<Container>> {
        debug!("Listing containers on backend={}", self.backend.kind());
        self.backend.list().await.map_err(|e| self.fail("list", e))
    }

    /// Look up a container by name.
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Some(Container))` - The container exists
    /// * `Ok(None)` - No container has this name
    /// * `Err(ContainerError)` - The name is invalid or the backend failed
    pub async fn get<'a>(
        &self,
        name: impl Into<Option<&'a str>>,
    ) -> ContainerResult<Option<Container>> {
        let name = self.validate(name)?;
        debug!("Getting container={} on backend={}", name, self.backend.kind());
        self.backend.get(name).await.map_err(|e| self.fail("get", e))
    }

    /// Create a container, or return the existing one with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidName`] before any backend call if the
    /// name is rejected, otherwise the translated backend failure.
    pub async fn create<'a>(&self, name: impl Into<Option<&'a str>>) -> ContainerResult<Container> {
        let name = self.validate(name)?;
        debug!("Creating container={} on backend={}", name, self.backend.kind());
        self.backend
            .create(name)
            .await
            .map_err(|e| self.fail("create", e))
    }

    /// Delete a container. Deleting a missing container succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::InvalidName`] before any backend call if the
    /// name is rejected, otherwise the translated backend failure.
    pub async fn delete<'a>(&self, name: impl Into<Option<&'a str>>) -> ContainerResult<()> {
        let name = self.validate(name)?;
        debug!("Deleting container={} on backend={}", name, self.backend.kind());
        self.backend
            .delete(name)
            .await
            .map_err(|e| self.fail("delete", e))
    }

    fn validate<'a>(&self, name: impl Into<Option<&'a str>>) -> ContainerResult<&'a str> {
        validate_container_name(name).inspect_err(|e| {
            debug!("Rejected container name: {}", e);
        })
    }

    fn fail(&self, operation: &str, err: BackendError) -> ContainerError {
        let err = translate(err);
        warn!(
            "Container {} failed on backend={} kind={:?}: {}",
            operation,
            self.backend.kind(),
            err.kind(),
            err
        );
        err
    }
}

impl Debug for ContainerManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ContainerManager")
            .field("backend", &self.backend.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backends::{MemoryBackend, S3Backend, S3Bucket, S3Client, S3Error};
    use crate::storage::error::{BackendResult, ErrorKind, FailureClass, NativeError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("counted backend failure code={0}")]
    struct CountedError(&'static str);

    impl NativeError for CountedError {
        fn failure_class(&self) -> FailureClass {
            match self.0 {
                "Denied" => FailureClass::Security,
                "Gone" => FailureClass::NotFound,
                _ => FailureClass::Other,
            }
        }
    }

    /// Counts calls and optionally fails all of them.
    #[derive(Default)]
    struct CountingBackend {
        calls: AtomicUsize,
        failure: Option<&'static str>,
    }

    impl CountingBackend {
        fn failing(code: &'static str) -> Self {
            Self {
                failure: Some(code),
                ..Default::default()
            }
        }

        fn call(&self) -> BackendResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.failure {
                Some(code) => Err(CountedError(code).into()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ContainerBackend for CountingBackend {
        fn kind(&self) -> BackendKind {
            BackendKind::Memory
        }

        async fn list(&self) -> BackendResult<Vec<Container>> {
            self.call()?;
            Ok(Vec::new())
        }

        async fn get(&self, _name: &str) -> BackendResult<Option<Container>> {
            self.call()?;
            Ok(None)
        }

        async fn create(&self, name: &str) -> BackendResult<Container> {
            self.call()?;
            Ok(Container::new(name, crate::storage::container::ContainerHandle::Memory))
        }

        async fn delete(&self, _name: &str) -> BackendResult<()> {
            self.call()
        }
    }

    #[tokio::test]
    async fn test_invalid_name_never_reaches_backend() {
        let backend = Arc::new(CountingBackend::failing("Denied"));
        let manager = ContainerManager::new(backend.clone());

        for name in ["ab", "-abc", "abc-", "ab--c", "Upper"] {
            let err = manager.create(name).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidName, "name={}", name);
            assert!(err.backend_error().is_none());
        }
        assert_eq!(manager.get(None).await.unwrap_err().kind(), ErrorKind::InvalidName);
        let too_long = "a".repeat(64);
        assert_eq!(
            manager.delete(too_long.as_str()).await.unwrap_err().kind(),
            ErrorKind::InvalidName
        );

        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_backend_failures_are_translated() {
        let cases = [
            ("Denied", ErrorKind::Security),
            ("Gone", ErrorKind::NotFound),
            ("Throttled", ErrorKind::Generic),
        ];
        for (code, kind) in cases {
            let manager = ContainerManager::new(Arc::new(CountingBackend::failing(code)));

            let err = manager.list().await.unwrap_err();
            assert_eq!(err.kind(), kind);
            assert_eq!(err.downcast_ref::<CountedError>().map(|e| e.0), Some(code));

            let err = manager.create("valid-name").await.unwrap_err();
            assert_eq!(err.kind(), kind);
        }
    }

    #[tokio::test]
    async fn test_valid_name_reaches_backend_once() {
        let backend = Arc::new(CountingBackend::default());
        let manager = ContainerManager::new(backend.clone());

        let container = manager.create("2abc").await.unwrap();
        assert_eq!(container.name(), "2abc");
        assert!(manager.get("2abc").await.unwrap().is_none());

        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_memory_manager_enforces_strict_names() {
        let manager = ContainerManager::builder(StorageConfig::memory())
            .build()
            .await
            .unwrap();
        assert_eq!(manager.backend_kind(), BackendKind::Memory);

        for name in ["ab", "Bad_Name!", "-x-", ""] {
            assert_eq!(
                manager.create(name).await.unwrap_err().kind(),
                ErrorKind::InvalidName,
                "name={}",
                name
            );
        }
        assert_eq!(manager.get(None).await.unwrap_err().kind(), ErrorKind::InvalidName);
        assert!(manager.list().await.unwrap().is_empty());

        assert_eq!(manager.create("dns-safe").await.unwrap().name(), "dns-safe");
    }

    #[tokio::test]
    async fn test_strict_names_on_directly_bound_memory_backend() {
        let manager = ContainerManager::new(Arc::new(MemoryBackend::new()));

        let err = manager.create("Not_DNS_Safe").await.unwrap_err();
        assert!(matches!(err, ContainerError::InvalidName { .. }));
        assert!(manager.list().await.unwrap().is_empty());
    }

    #[test]
    fn test_debug_names_bound_backend() {
        let manager = ContainerManager::new(Arc::new(MemoryBackend::new()));
        assert_eq!(format!("{:?}", manager), "ContainerManager { backend: Memory }");
    }

    struct DeniedS3;

    #[async_trait]
    impl S3Client for DeniedS3 {
        async fn list_buckets(&self) -> Result<Vec<S3Bucket>, S3Error> {
            Err(S3Error::new(
                "InvalidAccessKeyId",
                "The AWS Access Key Id you provided does not exist",
            )
            .with_status(403))
        }

        async fn create_bucket(&self, _name: &str) -> Result<(), S3Error> {
            Err(S3Error::new("SlowDown", "Please reduce your request rate.").with_status(503))
        }

        async fn delete_bucket(&self, _name: &str) -> Result<(), S3Error> {
            Err(S3Error::new("AccessDenied", "Access Denied").with_status(403))
        }
    }

    #[tokio::test]
    async fn test_s3_errors_keep_original() {
        let manager = ContainerManager::new(Arc::new(S3Backend::new(Arc::new(DeniedS3))));

        let err = manager.list().await.unwrap_err();
        assert!(matches!(err, ContainerError::Security { .. }));
        assert_eq!(
            err.downcast_ref::<S3Error>().map(|e| e.code.as_str()),
            Some("InvalidAccessKeyId")
        );

        let err = manager.delete("logs").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Security);

        let err = manager.create("logs").await.unwrap_err();
        assert!(matches!(err, ContainerError::Generic { .. }));
        assert!(err.to_string().contains("reduce your request rate"));
    }
}
