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
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::storage::backend::ContainerBackend;
use crate::storage::container::{BackendKind, Container, ContainerHandle};
use crate::storage::error::BackendResult;

/// Name-to-container map backing a [`MemoryBackend`].
///
/// Clone it to share one store between several backends.
pub type SharedStore = Arc<RwLock<HashMap<String, Container>>>;

/// Create an empty [`SharedStore`].
pub fn new_shared_store() -> SharedStore {
    Arc::new(RwLock::new(HashMap::new()))
}

/// Volatile backend keeping containers in a concurrent map.
///
/// Meant for tests and deployments without durability requirements.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    store: SharedStore,
}

impl MemoryBackend {
    /// Create a backend with its own empty store.
    pub fn new() -> Self {
        Self::with_store(new_shared_store())
    }

    /// Create a backend bound to an existing store.
    pub fn with_store(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerBackend for MemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    async fn list(&self) -> BackendResult<Vec<Container>> {
        let store = self.store.read().await;
        let mut containers: Vec<Container> = store.values().cloned().collect();
        containers.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(containers)
    }

    async fn get(&self, name: &str) -> BackendResult<Option<Container>> {
        Ok(self.store.read().await.get(name).cloned())
    }

    async fn create(&self, name: &str) -> BackendResult<Container> {
        let mut store = self.store.write().await;
        let container = store
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("Creating in-memory container={}", name);
                Container::new(name, ContainerHandle::Memory)
            })
            .clone();
        Ok(container)
    }

    async fn delete(&self, name: &str) -> BackendResult<()> {
        if self.store.write().await.remove(name).is_none() {
            debug!("Container={} not present, nothing to delete", name);
        }
        Ok(())
    }
}
