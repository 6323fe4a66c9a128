//! Object storage abstraction.
//!
//! This module provides an `ObjectStore` trait for the private/public asset
//! buckets, plus a filesystem-backed implementation for local deployments
//! and tests. SDK-backed stores (S3 and compatibles) implement the same
//! trait; their client internals live outside the engine.

mod fs_store;
mod traits;
mod types;

pub use fs_store::FsObjectStore;
pub use traits::ObjectStore;
pub use types::{S3Config, StorageError, StorageLocator};
