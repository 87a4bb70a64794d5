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

//! OpenStack Swift (Cloud Files) containers.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::storage::backend::ContainerBackend;
use crate::storage::container::{BackendKind, Container, ContainerHandle};
use crate::storage::error::{BackendResult, FailureClass, NativeError};

/// Account-level container entry (`GET /v1/{account}?format=json`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwiftContainerInfo {
    pub name: String,
    pub count: u64,
    pub bytes: u64,
}

/// Error returned by a Swift request, keyed by HTTP status.
#[derive(Error, Debug, Clone)]
#[error("Swift request failed with status={status}: {message}")]
pub struct SwiftError {
    pub status: u16,
    pub message: String,
}

impl SwiftError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl NativeError for SwiftError {
    fn failure_class(&self) -> FailureClass {
        match self.status {
            401 | 403 => FailureClass::Security,
            404 => FailureClass::NotFound,
            _ => FailureClass::Other,
        }
    }
}

/// Authenticated connection to one Swift account.
#[async_trait]
pub trait SwiftClient: Send + Sync {
    async fn list_containers(&self) -> Result<Vec<SwiftContainerInfo>, SwiftError>;

    /// `HEAD` on the container; `None` when it does not exist.
    async fn container_info(&self, name: &str) -> Result<Option<SwiftContainerInfo>, SwiftError>;

    /// `PUT` on the container. Swift treats this as create-or-keep.
    async fn create_container(&self, name: &str) -> Result<(), SwiftError>;

    async fn delete_container(&self, name: &str) -> Result<(), SwiftError>;
}

pub struct SwiftBackend {
    client: Arc<dyn SwiftClient>,
}

impl SwiftBackend {
    pub fn new(client: Arc<dyn SwiftClient>) -> Self {
        Self { client }
    }

    fn container(info: SwiftContainerInfo) -> Container {
        Container::new(
            info.name,
            ContainerHandle::Swift {
                object_count: info.count,
                bytes_used: info.bytes,
            },
        )
    }
}

#[async_trait]
impl ContainerBackend for SwiftBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Swift
    }

    async fn list(&self) -> BackendResult<Vec<Container>> {
        let containers = self.client.list_containers().await?;
        Ok(containers.into_iter().map(Self::container).collect())
    }

    async fn get(&self, name: &str) -> BackendResult<Option<Container>> {
        Ok(self.client.container_info(name).await?.map(Self::container))
    }

    async fn create(&self, name: &str) -> BackendResult<Container> {
        if let Some(existing) = self.client.container_info(name).await? {
            debug!("Swift container={} already exists", name);
            return Ok(Self::container(existing));
        }

        self.client.create_container(name).await?;
        info!("Created Swift container={}", name);
        Ok(Self::container(SwiftContainerInfo {
            name: name.to_string(),
            ..Default::default()
        }))
    }

    async fn delete(&self, name: &str) -> BackendResult<()> {
        if self.client.container_info(name).await?.is_none() {
            debug!("Swift container={} missing, skipping delete", name);
            return Ok(());
        }

        match self.client.delete_container(name).await {
            Ok(()) => {
                info!("Deleted Swift container={}", name);
                Ok(())
            }
            // Removed concurrently since the existence check.
            Err(e) if e.status == 404 => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
