use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::TokenId;

/// Flat credentials/endpoint record for an S3-compatible deployment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Config {
    pub access_key: String,
    pub secret_key: String,
    pub endpoint: String,
    pub bucket_name: String,
    /// Namespace within the bucket, allowing several deployments to share it.
    #[serde(default)]
    pub path_prefix: String,
}

/// Builds per-token object keys for one side (private or public) of an
/// asset class.
///
/// Keys have the shape `{prefix}/{base_path}/{token_id}{extension}` with
/// empty segments skipped and redundant slashes trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocator {
    base: String,
    extension: String,
}

impl StorageLocator {
    /// Creates a locator from a path prefix, a base path and a file
    /// extension (including the leading dot, or empty for extension-less
    /// objects).
    pub fn new(
        path_prefix: impl AsRef<str>,
        base_path: impl AsRef<str>,
        extension: impl Into<String>,
    ) -> Self {
        let mut base = String::new();
        for segment in [path_prefix.as_ref(), base_path.as_ref()] {
            let segment = segment.trim_matches('/');
            if segment.is_empty() {
                continue;
            }
            if !base.is_empty() {
                base.push('/');
            }
            base.push_str(segment);
        }

        Self {
            base,
            extension: extension.into(),
        }
    }

    /// The object key for the given token.
    pub fn key_for(&self, token_id: TokenId) -> String {
        if self.base.is_empty() {
            format!("{}{}", token_id, self.extension)
        } else {
            format!("{}/{}{}", self.base, token_id, self.extension)
        }
    }

    /// The base path this locator roots its keys under.
    pub fn base(&self) -> &str {
        &self.base
    }
}

/// Errors reported by object store implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested object does not exist.
    #[error("Object not found: {key}")]
    NotFound { key: String },

    /// The store refused the operation.
    #[error("Permission denied: {key}")]
    PermissionDenied { key: String },

    /// An I/O failure while reading or writing the object.
    #[error("I/O error on object {key}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A backend-specific failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Creates a not-found error for the given key.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates a permission-denied error for the given key.
    pub fn permission_denied(key: impl Into<String>) -> Self {
        Self::PermissionDenied { key: key.into() }
    }

    /// Wraps an I/O error, mapping the well-known kinds onto their
    /// dedicated variants.
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        let key = key.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { key },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { key },
            _ => Self::Io { key, source },
        }
    }

    /// Whether this error means the object is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
