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

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::storage::backend::ContainerBackend;
use crate::storage::container::{BackendKind, Container, ContainerHandle};
use crate::storage::error::{BackendResult, FailureClass, NativeError};

/// Blob service error codes meaning the caller is unauthenticated or unauthorized.
const SECURITY_ERROR_CODES: &[&str] = &[
    "AccessDenied",
    "AccountNotFound",
    "AuthenticationFailed",
    "AuthenticationFailure",
    "AuthorizationFailure",
    "AuthorizationPermissionMismatch",
    "InsufficientAccountPermissions",
];

const NOT_FOUND_CODE: &str = "ContainerNotFound";

/// Blob container properties as returned by the blob service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureContainerInfo {
    pub name: String,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Error returned by an Azure Blob Storage call.
#[derive(Error, Debug, Clone)]
#[error("Azure storage error code={code}: {message}")]
pub struct AzureError {
    pub code: String,
    pub message: String,
}

impl AzureError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl NativeError for AzureError {
    fn failure_class(&self) -> FailureClass {
        if SECURITY_ERROR_CODES.contains(&self.code.as_str()) {
            FailureClass::Security
        } else if self.code == NOT_FOUND_CODE {
            FailureClass::NotFound
        } else {
            FailureClass::Other
        }
    }
}

/// Container-level operations of a blob service client bound to one storage account.
#[async_trait]
pub trait AzureClient: Send + Sync {
    async fn list_containers(&self) -> Result<Vec<AzureContainerInfo>, AzureError>;

    async fn get_container(&self, name: &str) -> Result<Option<AzureContainerInfo>, AzureError>;

    /// Create the container unless it exists; returns its properties either way.
    async fn create_container_if_not_exists(
        &self,
        name: &str,
    ) -> Result<AzureContainerInfo, AzureError>;

    async fn delete_container(&self, name: &str) -> Result<(), AzureError>;
}

/// Container backend over Azure blob containers.
pub struct AzureBackend {
    client: Arc<dyn AzureClient>,
}

impl AzureBackend {
    pub fn new(client: Arc<dyn AzureClient>) -> Self {
        Self { client }
    }

    fn container(info: AzureContainerInfo) -> Container {
        Container::new(
            info.name,
            ContainerHandle::Azure {
                etag: info.etag,
                last_modified: info.last_modified,
            },
        )
    }
}

#[async_trait]
impl ContainerBackend for AzureBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Azure
    }

    async fn list(&self) -> BackendResult<Vec<Container>> {
        let containers = self.client.list_containers().await?;
        Ok(containers.into_iter().map(Self::container).collect())
    }

    async fn get(&self, name: &str) -> BackendResult<Option<Container>> {
        Ok(self.client.get_container(name).await?.map(Self::container))
    }

    async fn create(&self, name: &str) -> BackendResult<Container> {
        let info = self.client.create_container_if_not_exists(name).await?;
        info!("Ensured Azure container={}", name);
        Ok(Self::container(info))
    }

    async fn delete(&self, name: &str) -> BackendResult<()> {
        match self.client.delete_container(name).await {
            Ok(()) => {
                info!("Deleted Azure container={}", name);
                Ok(())
            }
            Err(e) if e.code == NOT_FOUND_CODE => {
                debug!("Azure container={} missing, skipping delete", name);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeBlobService {
        containers: Mutex<BTreeMap<String, AzureContainerInfo>>,
        failure: Option<AzureError>,
    }

    impl FakeBlobService {
        fn check(&self) -> Result<(), AzureError> {
            self.failure.clone().map_or(Ok(()), Err)
        }
    }

    #[async_trait]
    impl AzureClient for FakeBlobService {
        async fn list_containers(&self) -> Result<Vec<AzureContainerInfo>, AzureError> {
            self.check()?;
            Ok(self.containers.lock().unwrap().values().cloned().collect())
        }

        async fn get_container(
            &self,
            name: &str,
        ) -> Result<Option<AzureContainerInfo>, AzureError> {
            self.check()?;
            Ok(self.containers.lock().unwrap().get(name).cloned())
        }

        async fn create_container_if_not_exists(
            &self,
            name: &str,
        ) -> Result<AzureContainerInfo, AzureError> {
            self.check()?;
            let mut containers = self.containers.lock().unwrap();
            let etag = format!("0x{:X}", containers.len() + 1);
            Ok(containers
                .entry(name.to_string())
                .or_insert_with(|| AzureContainerInfo {
                    name: name.to_string(),
                    etag: Some(etag),
                    last_modified: Some(Utc::now()),
                })
                .clone())
        }

        async fn delete_container(&self, name: &str) -> Result<(), AzureError> {
            self.check()?;
            match self.containers.lock().unwrap().remove(name) {
                Some(_) => Ok(()),
                None => Err(AzureError::new(NOT_FOUND_CODE, "The specified container does not exist.")),
            }
        }
    }

    #[test]
    fn test_security_codes() {
        for code in ["AccessDenied", "AccountNotFound", "AuthenticationFailed"] {
            assert_eq!(
                AzureError::new(code, "").failure_class(),
                FailureClass::Security
            );
        }
        assert_eq!(
            AzureError::new("ServerBusy", "").failure_class(),
            FailureClass::Other
        );
    }

    #[tokio::test]
    async fn test_create_returns_existing_container() {
        let client = Arc::new(FakeBlobService::default());
        let backend = AzureBackend::new(client.clone());

        let first = backend.create("images").await.unwrap();
        let second = backend.create("images").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(client.containers.lock().unwrap().len(), 1);
        match (first.handle(), second.handle()) {
            (ContainerHandle::Azure { etag: a, .. }, ContainerHandle::Azure { etag: b, .. }) => {
                assert_eq!(a, b)
            }
            _ => panic!("Expected Azure handles"),
        }
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let backend = AzureBackend::new(Arc::new(FakeBlobService::default()));

        assert!(backend.get("images").await.unwrap().is_none());
        backend.create("images").await.unwrap();
        assert!(backend.get("images").await.unwrap().is_some());

        backend.delete("images").await.unwrap();
        backend.delete("images").await.unwrap();
        assert!(backend.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_authentication_failure_classified() {
        let client = FakeBlobService {
            failure: Some(AzureError::new("AuthenticationFailed", "bad signature")),
            ..Default::default()
        };
        let backend = AzureBackend::new(Arc::new(client));

        let err = backend.delete("images").await.unwrap_err();
        assert_eq!(err.class(), FailureClass::Security);
        assert!(err.to_string().contains("bad signature"));
    }
}
