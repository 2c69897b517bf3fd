//! Dual-backend sync
//!
//! The sync store owns the authoritative boss mapping for one group and
//! mirrors it two ways: a durable local cache (always) and a shared remote
//! store (when credentials are configured). Remote failures degrade to
//! local-only operation and are reported through [`SyncSource`] and
//! [`SaveOutcome`] flags, never as hard errors.

mod error;
mod local;
mod remote;
mod store;

pub use error::{CacheError, RemoteError};
pub use local::LocalCache;
pub use remote::{RemoteStore, RestRemote};
pub use store::{SaveOutcome, SyncSource, SyncStore};

#[cfg(test)]
mod store_tests;
