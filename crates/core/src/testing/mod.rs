//! Testing utilities and mock implementations for E2E tests.
//!
//! Mock implementations of every collaborator trait, allowing full engine
//! tests without a chain or an object store.
//!
//! # Example
//!
//! ```rust,ignore
//! use collection_sync_core::testing::{MockLedger, MemoryObjectStore, RecordingUpdater};
//!
//! let ledger = MockLedger::new();
//! ledger.mint(1).await;
//! ledger.set_revealed(1, true);
//!
//! let store = MemoryObjectStore::new();
//! store.put("private/1.png", b"pixels").await?;
//!
//! // Wire into a CollectionOrchestrator...
//! ```

mod mock_ledger;
mod mock_store;
mod mock_updater;

pub use mock_ledger::MockLedger;
pub use mock_store::MemoryObjectStore;
pub use mock_updater::RecordingUpdater;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::storage::S3Config;

    /// An S3 configuration pointing at nothing in particular.
    pub fn s3_config() -> S3Config {
        S3Config {
            access_key: "test-access".to_string(),
            secret_key: "test-secret".to_string(),
            endpoint: "http://localhost:9000".to_string(),
            bucket_name: "test-collection".to_string(),
            path_prefix: String::new(),
        }
    }

    /// Serialized placeholder metadata for one token.
    pub fn metadata_json(name: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "name": name,
            "image": "placeholder.png",
            "attributes": [],
        }))
        .expect("fixture metadata serializes")
    }
}
