//! Persistence port for the catalog.
//!
//! All durable state lives in a remote store; this crate defines the async
//! port the application talks to, plus an in-memory implementation for tests
//! and development. Each call may fail independently; there is no
//! transaction boundary spanning the multiple writes a batch produces.

pub mod in_memory;
pub mod port;

pub use in_memory::InMemoryStore;
pub use port::{CatalogStore, StoreError};
