//! Reveal status provider.
//!
//! Answers, per token id, whether the token is currently revealed. The
//! verdict is always re-derived from the ledger. It is never cached across
//! calls, so a collection that un-reveals tokens still reconciles correctly.

mod collection;
mod traits;
mod types;

pub use collection::CollectionStatusProvider;
pub use traits::StatusProvider;
pub use types::RevealState;
