// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License. You may obtain a copy
// of the License at http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under
// the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR REPRESENTATIONS
// OF ANY KIND, either express or implied. See the License for the specific language
// governing permissions and limitations under the License.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::{ContainerError, ContainerResult};

/// Storage backend type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// Volatile in-process containers
    Memory,
    /// One directory per container under a root path
    Filesystem,
}

/// Configuration for the backends that can be built without a vendor client
///
/// S3, Azure, Swift and object_store backends take a ready client and are
/// constructed directly instead.
///
/// # Examples
///
/// ## In-memory
/// ```
/// use cloud_containers::storage::StorageConfig;
///
/// let config = StorageConfig::memory();
/// ```
///
/// ## Filesystem
/// ```
/// use cloud_containers::storage::StorageConfig;
///
/// let config = StorageConfig::new("fs")
///     .with_option("path", "/var/lib/containers");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage backend type
    #[serde(rename = "type")]
    pub storage_type: StorageType,

    /// Backend options
    ///
    /// Memory: none.
    ///
    /// Filesystem:
    /// - path: Root directory (created if missing)
    #[serde(default)]
    pub options: HashMap<String, String>,
}

impl StorageConfig {
    /// Create a new storage configuration.
    ///
    /// # Arguments
    ///
    /// * `storage_type` - One of "memory"/"mem" or "filesystem"/"fs"
    ///
    /// # Panics
    ///
    /// Panics on an unknown storage type. Use [`StorageConfig::try_new`] to
    /// handle that case.
    pub fn new(storage_type: impl Into<String>) -> Self {
        let storage_type = storage_type.into();
        match Self::try_new(storage_type.as_str()) {
            Ok(config) => config,
            Err(_) => panic!("Unknown storage type: {}", storage_type),
        }
    }

    /// Create a new storage configuration, rejecting unknown types.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ConfigError`] if the type is not recognized.
    pub fn try_new(storage_type: &str) -> ContainerResult<Self> {
        let storage_type = match storage_type.to_lowercase().as_str() {
            "memory" | "mem" => StorageType::Memory,
            "filesystem" | "fs" => StorageType::Filesystem,
            _ => {
                return Err(ContainerError::ConfigError(format!(
                    "Unknown storage type: {}",
                    storage_type
                )))
            }
        };
        Ok(Self::of_type(storage_type))
    }

    fn of_type(storage_type: StorageType) -> Self {
        Self {
            storage_type,
            options: HashMap::new(),
        }
    }

    /// In-memory backend configuration.
    pub fn memory() -> Self {
        Self::of_type(StorageType::Memory)
    }

    /// Directory-per-container configuration. Requires a `path` option.
    pub fn filesystem() -> Self {
        Self::of_type(StorageType::Filesystem)
    }

    /// Add a configuration option (for method chaining).
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Add multiple configuration options (for method chaining).
    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn get_option(&self, key: &str) -> Option<&String> {
        self.options.get(key)
    }

    /// Get a required option.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ConfigError`] naming the storage type and the
    /// missing key.
    pub fn require_option(&self, key: &str) -> ContainerResult<&String> {
        self.options.get(key).ok_or_else(|| {
            ContainerError::ConfigError(format!(
                "{} storage requires '{}' option",
                self.storage_type_str(),
                key
            ))
        })
    }

    /// The storage type as a string ("memory" or "filesystem").
    pub fn storage_type_str(&self) -> &str {
        match self.storage_type {
            StorageType::Memory => "memory",
            StorageType::Filesystem => "filesystem",
        }
    }

    /// Load a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::ConfigError`] if the JSON is malformed or
    /// names an unknown storage type.
    pub fn from_json(json: &str) -> ContainerResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ContainerError::ConfigError(format!("Invalid storage config: {}", e)))
    }
}
