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

use chrono::{DateTime, Utc};
use object_store::path::Path as ObjectPath;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Which backend produced a [`Container`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    S3,
    Azure,
    Swift,
    Filesystem,
    Memory,
    ObjectStore,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::S3 => "s3",
            BackendKind::Azure => "azure",
            BackendKind::Swift => "swift",
            BackendKind::Filesystem => "filesystem",
            BackendKind::Memory => "memory",
            BackendKind::ObjectStore => "object_store",
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Backend-owned payload carried by a container. Outside the adapter that
/// built it, it only surfaces as text through the alternate `Display` form.
#[derive(Debug, Clone)]
pub(crate) enum ContainerHandle {
    S3 {
        creation_date: Option<DateTime<Utc>>,
    },
    Azure {
        etag: Option<String>,
        last_modified: Option<DateTime<Utc>>,
    },
    Swift {
        object_count: u64,
        bytes_used: u64,
    },
    Filesystem {
        path: PathBuf,
    },
    Memory,
    ObjectStore {
        prefix: ObjectPath,
    },
}

impl ContainerHandle {
    fn kind(&self) -> BackendKind {
        match self {
            ContainerHandle::S3 { .. } => BackendKind::S3,
            ContainerHandle::Azure { .. } => BackendKind::Azure,
            ContainerHandle::Swift { .. } => BackendKind::Swift,
            ContainerHandle::Filesystem { .. } => BackendKind::Filesystem,
            ContainerHandle::Memory => BackendKind::Memory,
            ContainerHandle::ObjectStore { .. } => BackendKind::ObjectStore,
        }
    }

    fn describe(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ContainerHandle::S3 { creation_date } => match creation_date {
                Some(created) => write!(f, "created={}", created.to_rfc3339()),
                None => Ok(()),
            },
            ContainerHandle::Azure {
                etag,
                last_modified,
            } => {
                if let Some(etag) = etag {
                    write!(f, "etag={}", etag)?;
                }
                if let Some(modified) = last_modified {
                    if etag.is_some() {
                        f.write_str(" ")?;
                    }
                    write!(f, "last_modified={}", modified.to_rfc3339())?;
                }
                Ok(())
            }
            ContainerHandle::Swift {
                object_count,
                bytes_used,
            } => write!(f, "objects={} bytes={}", object_count, bytes_used),
            ContainerHandle::Filesystem { path } => write!(f, "path={}", path.display()),
            ContainerHandle::Memory => Ok(()),
            ContainerHandle::ObjectStore { prefix } => write!(f, "prefix={}", prefix),
        }
    }
}

/// A named container (bucket, blob container or top-level directory).
///
/// Containers are built by backends in response to `list`, `get` or `create`
/// and are immutable afterwards. Dropping one has no effect on storage.
#[derive(Debug, Clone)]
pub struct Container {
    name: String,
    handle: ContainerHandle,
}

impl Container {
    pub(crate) fn new(name: impl Into<String>, handle: ContainerHandle) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }

    /// The portable container name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The backend this container belongs to.
    pub fn backend_kind(&self) -> BackendKind {
        self.handle.kind()
    }

    #[cfg(test)]
    pub(crate) fn handle(&self) -> &ContainerHandle {
        &self.handle
    }
}

impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.backend_kind() == other.backend_kind()
    }
}

impl Eq for Container {}

/// `{}` prints the name. `{:#}` adds the backend kind and whatever the
/// backend reported about the container.
impl Display for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name)?;
        if f.alternate() {
            write!(f, " [{}] ", self.backend_kind())?;
            self.handle.describe(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_name_and_kind() {
        let container = Container::new("logs", ContainerHandle::Memory);
        assert_eq!(container.name(), "logs");
        assert_eq!(container.backend_kind(), BackendKind::Memory);
        assert_eq!(container.to_string(), "logs");
    }

    #[test]
    fn test_equality_ignores_handle_payload() {
        let a = Container::new(
            "data",
            ContainerHandle::Swift {
                object_count: 1,
                bytes_used: 10,
            },
        );
        let b = Container::new(
            "data",
            ContainerHandle::Swift {
                object_count: 5,
                bytes_used: 500,
            },
        );
        let c = Container::new("data", ContainerHandle::Memory);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_backend_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&BackendKind::Filesystem).unwrap(),
            "\"filesystem\""
        );
        assert_eq!(BackendKind::ObjectStore.to_string(), "object_store");
    }

    #[test]
    fn test_alternate_display_describes_handle() {
        let swift = Container::new(
            "data",
            ContainerHandle::Swift {
                object_count: 3,
                bytes_used: 1024,
            },
        );
        assert_eq!(format!("{:#}", swift), "data [swift] objects=3 bytes=1024");

        let fs = Container::new(
            "logs",
            ContainerHandle::Filesystem {
                path: PathBuf::from("/srv/logs"),
            },
        );
        assert_eq!(format!("{:#}", fs), "logs [filesystem] path=/srv/logs");

        let azure = Container::new(
            "images",
            ContainerHandle::Azure {
                etag: Some("0x1".to_string()),
                last_modified: None,
            },
        );
        assert_eq!(format!("{:#}", azure), "images [azure] etag=0x1");

        let s3 = Container::new(
            "bucket",
            ContainerHandle::S3 {
                creation_date: None,
            },
        );
        assert_eq!(format!("{:#}", s3).trim_end(), "bucket [s3]");
        assert_eq!(s3.to_string(), "bucket");
    }
}
