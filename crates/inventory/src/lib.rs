//! Inventory operations.
//!
//! This crate contains the pure stock-movement logic: converting a bulk grid
//! edit into the minimal set of directional transactions plus aggregate
//! updates, validating single interactive adjustments, and resolving which
//! record an ambiguous (color, size) adjustment targets. Deterministic
//! domain logic only (no IO, no HTTP, no storage).

pub mod adjust;
pub mod batch;
pub mod resolve;

pub use adjust::{plan_adjustment, validate_adjustment, AdjustmentPlan};
pub use batch::{plan_batch, BatchPlan, CellEdit, RecordLookup, RecordUpdate};
pub use resolve::resolve_candidate;
