//! Ledger collaborator boundary.
//!
//! This module defines the `Ledger` trait through which the engine observes
//! on-chain state: per-token reveal conditions, the minted count, and the
//! mint event stream. Transport details (RPC, websockets, retries below the
//! subscription level) belong to the implementation behind the trait.

mod traits;
mod types;

pub use traits::Ledger;
pub use types::{LedgerError, MintEvent, TokenId};
