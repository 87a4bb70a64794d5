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

//! Error taxonomy for container operations.
//!
//! Backends fail with their own native error types. Each native error knows
//! which [`FailureClass`] its code belongs to, and [`translate`] turns a
//! [`BackendError`] into the portable [`ContainerError`] exactly once, at the
//! [`ContainerManager`](super::manager::ContainerManager) boundary.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// Coarse classification a backend assigns to one of its native errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The caller is not who it claims to be, or lacks permission.
    Security,
    /// The addressed resource does not exist.
    NotFound,
    /// Anything else: network, service, quota, conflicts.
    Other,
}

/// A vendor-native error that can classify itself.
///
/// Implemented by every error type a backend client can raise. The code set
/// behind each class is backend-specific.
pub trait NativeError: Error + Send + Sync + 'static {
    fn failure_class(&self) -> FailureClass;
}

impl NativeError for std::io::Error {
    fn failure_class(&self) -> FailureClass {
        match self.kind() {
            std::io::ErrorKind::PermissionDenied => FailureClass::Security,
            std::io::ErrorKind::NotFound => FailureClass::NotFound,
            _ => FailureClass::Other,
        }
    }
}

impl NativeError for object_store::Error {
    fn failure_class(&self) -> FailureClass {
        match self {
            object_store::Error::PermissionDenied { .. }
            | object_store::Error::Unauthenticated { .. } => FailureClass::Security,
            object_store::Error::NotFound { .. } => FailureClass::NotFound,
            _ => FailureClass::Other,
        }
    }
}

/// An untranslated failure raised by a [`ContainerBackend`](super::backend::ContainerBackend).
///
/// Holds the original native error unmodified.
pub struct BackendError {
    class: FailureClass,
    source: Box<dyn Error + Send + Sync + 'static>,
}

impl BackendError {
    pub fn class(&self) -> FailureClass {
        self.class
    }

    /// The original backend error.
    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.source.as_ref()
    }

    /// Downcast the original backend error to its concrete type.
    pub fn downcast_ref<T: Error + 'static>(&self) -> Option<&T> {
        self.source.downcast_ref::<T>()
    }
}

impl<E: NativeError> From<E> for BackendError {
    fn from(err: E) -> Self {
        Self {
            class: err.failure_class(),
            source: Box::new(err),
        }
    }
}

impl Debug for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "BackendError({:?}, {:?})", self.class, self.source)
    }
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.source, f)
    }
}

impl Error for BackendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Portable error kind, independent of the backend that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidName,
    Security,
    NotFound,
    Generic,
}

/// Errors that can occur during container operations
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("Invalid container name {}: {reason}", display_name(.name))]
    InvalidName {
        name: Option<String>,
        reason: String,
    },

    #[error("Security error: {source}")]
    Security { source: BackendError },

    #[error("Not found: {source}")]
    NotFound { source: BackendError },

    #[error("Backend error: {source}")]
    Generic { source: BackendError },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

fn display_name(name: &Option<String>) -> String {
    match name {
        Some(n) => format!("'{}'", n),
        None => "<absent>".to_string(),
    }
}

impl ContainerError {
    pub(crate) fn invalid_name(name: Option<&str>, reason: impl Into<String>) -> Self {
        ContainerError::InvalidName {
            name: name.map(str::to_string),
            reason: reason.into(),
        }
    }

    /// The normalized kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContainerError::InvalidName { .. } => ErrorKind::InvalidName,
            ContainerError::Security { .. } => ErrorKind::Security,
            ContainerError::NotFound { .. } => ErrorKind::NotFound,
            ContainerError::Generic { .. }
            | ContainerError::ConfigError(_)
            | ContainerError::IoError(_) => ErrorKind::Generic,
        }
    }

    /// The untranslated backend error, if this error came from a backend call.
    pub fn backend_error(&self) -> Option<&BackendError> {
        match self {
            ContainerError::Security { source }
            | ContainerError::NotFound { source }
            | ContainerError::Generic { source } => Some(source),
            _ => None,
        }
    }

    /// Downcast the original backend error to its concrete native type.
    pub fn downcast_ref<T: Error + 'static>(&self) -> Option<&T> {
        self.backend_error().and_then(|e| e.downcast_ref::<T>())
    }
}

/// Normalize a backend failure into a [`ContainerError`].
///
/// The original error is kept as the source in every case.
pub fn translate(err: BackendError) -> ContainerError {
    match err.class() {
        FailureClass::Security => ContainerError::Security { source: err },
        FailureClass::NotFound => ContainerError::NotFound { source: err },
        FailureClass::Other => ContainerError::Generic { source: err },
    }
}

/// Result type for container operations
pub type ContainerResult<T> = Result<T, ContainerError>;

/// Result type for raw backend calls, before translation
pub type BackendResult<T> = Result<T, BackendError>;
