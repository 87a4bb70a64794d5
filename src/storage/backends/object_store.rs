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

//! Containers as top-level prefixes of an [`ObjectStore`].

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::TryStreamExt;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;
use tracing::{debug, info};

use crate::storage::backend::ContainerBackend;
use crate::storage::container::{BackendKind, Container, ContainerHandle};
use crate::storage::error::BackendResult;

/// Empty object written so that an otherwise empty container is still listed.
pub const CONTAINER_MARKER: &str = ".container";

/// Backend treating the top-level prefixes of one object store as containers.
///
/// The store is supplied ready to use (credentials, bucket, retries already
/// configured by the caller).
pub struct ObjectStoreBackend {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreBackend {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    fn container(prefix: ObjectPath) -> Option<Container> {
        let last = prefix.parts().last()?;
        let name: &str = last.as_ref();
        let name = name.to_string();
        Some(Container::new(name, ContainerHandle::ObjectStore { prefix }))
    }

    async fn objects_under(&self, prefix: &ObjectPath) -> BackendResult<Vec<ObjectPath>> {
        let locations: Vec<ObjectPath> = self
            .store
            .list(Some(prefix))
            .map_ok(|meta| meta.location)
            .try_collect()
            .await?;
        Ok(locations)
    }
}

#[async_trait]
impl ContainerBackend for ObjectStoreBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::ObjectStore
    }

    async fn list(&self) -> BackendResult<Vec<Container>> {
        let listing = self.store.list_with_delimiter(None).await?;
        Ok(listing
            .common_prefixes
            .into_iter()
            .filter_map(Self::container)
            .collect())
    }

    async fn get(&self, name: &str) -> BackendResult<Option<Container>> {
        let prefix = ObjectPath::from(name);
        let listing = self.store.list_with_delimiter(Some(&prefix)).await?;
        if listing.objects.is_empty() && listing.common_prefixes.is_empty() {
            return Ok(None);
        }
        Ok(Self::container(prefix))
    }

    async fn create(&self, name: &str) -> BackendResult<Container> {
        if let Some(existing) = self.get(name).await? {
            debug!("Container prefix={} already exists", name);
            return Ok(existing);
        }

        let prefix = ObjectPath::from(name);
        let marker = prefix.child(CONTAINER_MARKER);
        self.store
            .put(&marker, PutPayload::from(Bytes::new()))
            .await?;
        info!("Created container marker={} in store={}", marker, self.store);
        Ok(Container::new(name, ContainerHandle::ObjectStore { prefix }))
    }

    async fn delete(&self, name: &str) -> BackendResult<()> {
        let prefix = ObjectPath::from(name);
        let objects = self.objects_under(&prefix).await?;
        if objects.is_empty() {
            debug!("Container prefix={} is empty, skipping delete", name);
            return Ok(());
        }

        info!(
            "Deleting container prefix={} with count={} objects",
            name,
            objects.len()
        );
        for location in objects {
            match self.store.delete(&location).await {
                Ok(()) | Err(object_store::Error::NotFound { .. }) => (),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

impl Debug for ObjectStoreBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "ObjectStoreBackend(store={})", self.store)
    }
}
