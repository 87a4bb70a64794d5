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

/// S3 error codes meaning the caller is unauthenticated or unauthorized.
const SECURITY_ERROR_CODES: &[&str] = &[
    "InvalidAccessKeyId",
    "InvalidSecurity",
    "InvalidToken",
    "ExpiredToken",
    "SignatureDoesNotMatch",
    "AccessDenied",
    "AllAccessDisabled",
    "AccountProblem",
];

/// A bucket as reported by `ListBuckets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Bucket {
    pub name: String,
    pub creation_date: Option<DateTime<Utc>>,
}

/// Error returned by an S3 API call.
#[derive(Error, Debug, Clone)]
#[error("S3 error code={code}: {message}")]
pub struct S3Error {
    pub code: String,
    pub message: String,
    pub status: Option<u16>,
}

impl S3Error {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

impl NativeError for S3Error {
    fn failure_class(&self) -> FailureClass {
        if SECURITY_ERROR_CODES.contains(&self.code.as_str())
            || matches!(self.status, Some(401) | Some(403))
        {
            FailureClass::Security
        } else if self.code == "NoSuchBucket" {
            FailureClass::NotFound
        } else {
            FailureClass::Other
        }
    }
}

/// The bucket-level subset of an S3 client. Supplied ready to use, with
/// credentials and region already bound.
#[async_trait]
pub trait S3Client: Send + Sync {
    async fn list_buckets(&self) -> Result<Vec<S3Bucket>, S3Error>;

    async fn create_bucket(&self, name: &str) -> Result<(), S3Error>;

    async fn delete_bucket(&self, name: &str) -> Result<(), S3Error>;
}

/// Container backend over S3 buckets.
pub struct S3Backend {
    client: Arc<dyn S3Client>,
}

impl S3Backend {
    pub fn new(client: Arc<dyn S3Client>) -> Self {
        Self { client }
    }

    fn container(bucket: S3Bucket) -> Container {
        Container::new(
            bucket.name,
            ContainerHandle::S3 {
                creation_date: bucket.creation_date,
            },
        )
    }
}

#[async_trait]
impl ContainerBackend for S3Backend {
    fn kind(&self) -> BackendKind {
        BackendKind::S3
    }

    async fn list(&self) -> BackendResult<Vec<Container>> {
        let buckets = self.client.list_buckets().await?;
        Ok(buckets.into_iter().map(Self::container).collect())
    }

    async fn get(&self, name: &str) -> BackendResult<Option<Container>> {
        // ListBuckets is the only account-wide lookup; bucket names compare
        // case-insensitively.
        let bucket = self
            .client
            .list_buckets()
            .await?
            .into_iter()
            .find(|b| b.name.eq_ignore_ascii_case(name));
        Ok(bucket.map(Self::container))
    }

    async fn create(&self, name: &str) -> BackendResult<Container> {
        match self.client.create_bucket(name).await {
            Ok(()) => info!("Created S3 bucket={}", name),
            Err(e) if e.code == "BucketAlreadyOwnedByYou" => {
                debug!("S3 bucket={} already exists", name)
            }
            Err(e) => return Err(e.into()),
        }

        // A fresh bucket may not be listed yet.
        Ok(self.get(name).await?.unwrap_or_else(|| {
            Self::container(S3Bucket {
                name: name.to_string(),
                creation_date: None,
            })
        }))
    }

    async fn delete(&self, name: &str) -> BackendResult<()> {
        match self.client.delete_bucket(name).await {
            Ok(()) => {
                info!("Deleted S3 bucket={}", name);
                Ok(())
            }
            Err(e) if e.code == "NoSuchBucket" => {
                debug!("S3 bucket={} missing, skipping delete", name);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
