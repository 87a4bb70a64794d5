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
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::storage::backend::ContainerBackend;
use crate::storage::container::{BackendKind, Container, ContainerHandle};
use crate::storage::error::{BackendResult, ContainerResult};

/// Directory primitives the filesystem backend is built on.
#[async_trait]
pub trait DirectoryOps: Send + Sync {
    async fn exists(&self, path: &Path) -> io::Result<bool>;

    async fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Immediate subdirectories of `path`, as full paths.
    async fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    async fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// [`DirectoryOps`] on the local disk through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDirectories;

#[async_trait]
impl DirectoryOps for LocalDirectories {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        match tokio::fs::metadata(path).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut dirs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                dirs.push(entry.path());
            }
        }
        Ok(dirs)
    }

    async fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_dir_all(path).await
    }
}

/// Backend mapping each container to a directory under a root path.
pub struct FilesystemBackend {
    root: PathBuf,
    dirs: Arc<dyn DirectoryOps>,
}

impl FilesystemBackend {
    /// Create a filesystem backend rooted at `root`, creating the root
    /// directory if it does not exist yet.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory holding one subdirectory per container
    /// * `dirs` - Directory primitives to use
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IoError`](crate::storage::error::ContainerError::IoError)
    /// if the root cannot be checked or created.
    pub async fn new(
        root: impl Into<PathBuf>,
        dirs: Arc<dyn DirectoryOps>,
    ) -> ContainerResult<Self> {
        let root = root.into();
        if !dirs.exists(&root).await? {
            info!("Creating container root directory={}", root.display());
            dirs.create_dir(&root).await?;
        }
        Ok(Self { root, dirs })
    }

    /// Filesystem backend on the local disk.
    pub async fn local(root: impl Into<PathBuf>) -> ContainerResult<Self> {
        Self::new(root, Arc::new(LocalDirectories)).await
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `root / name`, provided `name` is exactly one normal path component.
    fn container_path(&self, name: &str) -> io::Result<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == name => Ok(self.root.join(name)),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("container name '{}' does not name a directory under the root", name),
            )),
        }
    }

    fn container_at(path: PathBuf) -> Option<Container> {
        let name = path.file_name()?.to_str()?.to_string();
        Some(Container::new(name, ContainerHandle::Filesystem { path }))
    }
}

#[async_trait]
impl ContainerBackend for FilesystemBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Filesystem
    }

    async fn list(&self) -> BackendResult<Vec<Container>> {
        let dirs = self.dirs.list_subdirectories(&self.root).await?;
        // Directory names that are not valid UTF-8 cannot be container names.
        Ok(dirs.into_iter().filter_map(Self::container_at).collect())
    }

    async fn get(&self, name: &str) -> BackendResult<Option<Container>> {
        let path = self.container_path(name)?;
        if self.dirs.exists(&path).await? {
            Ok(Self::container_at(path))
        } else {
            Ok(None)
        }
    }

    async fn create(&self, name: &str) -> BackendResult<Container> {
        let path = self.container_path(name)?;
        if !self.dirs.exists(&path).await? {
            info!("Creating container directory={}", path.display());
            self.dirs.create_dir(&path).await?;
        }
        Ok(Container::new(name, ContainerHandle::Filesystem { path }))
    }

    async fn delete(&self, name: &str) -> BackendResult<()> {
        let path = self.container_path(name)?;
        if !self.dirs.exists(&path).await? {
            debug!("Container directory={} missing, skipping delete", path.display());
            return Ok(());
        }
        info!("Deleting container directory={}", path.display());
        self.dirs.remove_dir_all(&path).await?;
        Ok(())
    }
}
