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

//! Backend implementations of [`ContainerBackend`](super::backend::ContainerBackend).

pub mod azure;
pub mod filesystem;
pub mod memory;
pub mod object_store;
pub mod s3;
pub mod swift;

pub use self::azure::{AzureBackend, AzureClient, AzureContainerInfo, AzureError};
pub use self::filesystem::{DirectoryOps, FilesystemBackend, LocalDirectories};
pub use self::memory::{new_shared_store, MemoryBackend, SharedStore};
pub use self::object_store::ObjectStoreBackend;
pub use self::s3::{S3Backend, S3Bucket, S3Client, S3Error};
pub use self::swift::{SwiftBackend, SwiftClient, SwiftContainerInfo, SwiftError};
