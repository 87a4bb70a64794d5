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

//! Container storage abstraction layer
//!
//! This module provides one set of container operations (list, get, create,
//! delete) over different storage providers: S3 buckets, Azure blob
//! containers, Swift containers, directories on a local filesystem, an
//! in-process map, and top-level prefixes of any `object_store` location.
//!
//! [`ContainerManager`] is the entry point. It validates names, delegates to a
//! [`ContainerBackend`], and translates backend failures into
//! [`ContainerError`].

pub mod backend;
pub mod backends;
pub mod config;
pub mod container;
pub mod error;
pub mod factory;
pub mod manager;
pub mod name;

// Public exports
pub use backend::ContainerBackend;
pub use config::{StorageConfig, StorageType};
pub use container::{BackendKind, Container};
pub use error::{BackendError, ContainerError, ContainerResult, ErrorKind, FailureClass};
pub use factory::BackendFactory;
pub use manager::{ContainerManager, ContainerManagerBuilder};
pub use name::validate_container_name;
