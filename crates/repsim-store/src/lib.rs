//! Client-side business record store.
//!
//! Owns the collection of generated business records, the active selection,
//! and the in-flight/error state around the two asynchronous operations
//! (full generation, headline-only regeneration). The store is the sole
//! caller of the [`Transport`] and the sole mutator of the collection;
//! presentation code reads a [`StoreSnapshot`] and sends intents back in.

pub mod error;
pub mod persistence;
pub mod store;
pub mod transport;

pub use error::{SnapshotError, StoreError, TransportError};
pub use persistence::{JsonFileStore, MemoryStore, SnapshotStore};
pub use store::{Store, StoreSnapshot};
pub use transport::{HttpTransport, Transport};
