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

//! # Cloud Containers
//!
//! A Rust library for managing storage containers (buckets, blob containers,
//! top-level directories) through one provider-agnostic interface.
//!
//! ## Features
//!
//! - **Backends**: AWS S3, Azure Blob Storage, OpenStack Swift, local filesystem, in-memory,
//!   and top-level prefixes of any `object_store` store
//! - **Name validation**: DNS-safe container names checked before any I/O
//! - **Error normalization**: security, not-found and generic failures, original error kept
//!
//! ## Quick Start
//!
//! ```rust
//! use cloud_containers::{ContainerManager, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let manager = ContainerManager::builder(StorageConfig::memory())
//!     .build()
//!     .await?;
//!
//! manager.create("foo").await?;
//! manager.create("bar").await?;
//! assert_eq!(manager.list().await?.len(), 2);
//!
//! manager.delete("foo").await?;
//! assert!(manager.get("foo").await?.is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ### Filesystem Example
//!
//! ```rust,no_run
//! use cloud_containers::{ContainerManager, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = StorageConfig::filesystem().with_option("path", "/var/lib/containers");
//!
//! let manager = ContainerManager::builder(config).build().await?;
//! let container = manager.create("images").await?;
//! println!("{}", container);
//! # Ok(())
//! # }
//! ```
//!
//! ### Vendor Client Example
//!
//! S3, Azure and Swift backends take a client implementing a small trait;
//! the object_store backend takes any `Arc<dyn ObjectStore>`.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cloud_containers::storage::backends::S3Backend;
//! use cloud_containers::ContainerManager;
//!
//! let manager = ContainerManager::new(Arc::new(S3Backend::new(Arc::new(my_s3_client))));
//! ```
//!
//! ## Modules
//!
//! - [`storage`] - Container manager, backends, name validation, and errors

pub mod storage;

// Re-export commonly used types
pub use storage::{
    validate_container_name, Container, ContainerError, ContainerManager, ErrorKind,
    StorageConfig,
};
