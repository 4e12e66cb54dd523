//! Stock movement ledger.
//!
//! Transactions are immutable facts: once constructed they are appended to
//! the store and never mutated or deleted. Current stock is kept as a
//! separately-updated aggregate; the ledger is the audit trail from which it
//! could in principle be reconstructed.

pub mod transaction;

pub use transaction::{Direction, StockTransaction};
