// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License. You may obtain a copy
// of the License at http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under
// the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR REPRESENTATIONS
// OF ANY KIND, either express or implied. See the License for the specific language
// governing permissions and limitations under the License.

use async_trait::async_trait;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use super::container::{BackendKind, Container};
use super::error::BackendResult;

/// Container operations implemented once per storage provider.
///
/// Backends report failures with their native errors wrapped in a
/// [`BackendError`](super::error::BackendError); translation into portable
/// error kinds is left to [`ContainerManager`](super::manager::ContainerManager).
#[async_trait]
pub trait ContainerBackend: Send + Sync {
    /// The provider this backend talks to.
    fn kind(&self) -> BackendKind;

    /// List all containers visible to the bound credentials.
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Vec<Container>)` - Every container, in whatever order the backend returns them
    /// * `Err(BackendError)` - If the backend call fails
    async fn list(&self) -> BackendResult<Vec<Container>>;

    /// Look up a container by name.
    ///
    /// # Arguments
    ///
    /// * `name` - A name that already passed validation
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Some(Container))` - The container exists
    /// * `Ok(None)` - No container has this name
    /// * `Err(BackendError)` - If the existence check fails
    async fn get(&self, name: &str) -> BackendResult<Option<Container>>;

    /// Create a container, or return the existing one with the same name.
    ///
    /// # Arguments
    ///
    /// * `name` - A name that already passed validation
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * Credentials are invalid or lack permission
    /// * The name is taken by another account (globally scoped namespaces)
    /// * Network or storage access errors occur
    async fn create(&self, name: &str) -> BackendResult<Container>;

    /// Delete a container. Deleting a missing container succeeds.
    ///
    /// # Arguments
    ///
    /// * `name` - A name that already passed validation
    async fn delete(&self, name: &str) -> BackendResult<()>;
}

impl Debug for dyn ContainerBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "ContainerBackend(kind={})", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::container::ContainerHandle;

    struct FixedBackend;

    #[async_trait]
    impl ContainerBackend for FixedBackend {
        fn kind(&self) -> BackendKind {
            BackendKind::Memory
        }

        async fn list(&self) -> BackendResult<Vec<Container>> {
            Ok(vec![Container::new("fixed", ContainerHandle::Memory)])
        }

        async fn get(&self, name: &str) -> BackendResult<Option<Container>> {
            Ok((name == "fixed").then(|| Container::new("fixed", ContainerHandle::Memory)))
        }

        async fn create(&self, name: &str) -> BackendResult<Container> {
            Ok(Container::new(name, ContainerHandle::Memory))
        }

        async fn delete(&self, _name: &str) -> BackendResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_backend_debug() {
        let backend: &dyn ContainerBackend = &FixedBackend;
        let debug_str = format!("{:?}", backend);
        assert_eq!(debug_str, "ContainerBackend(kind=memory)");
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let backend: Box<dyn ContainerBackend> = Box::new(FixedBackend);
        assert_eq!(backend.list().await.unwrap().len(), 1);
        assert!(backend.get("fixed").await.unwrap().is_some());
        assert!(backend.get("other").await.unwrap().is_none());
    }
}
