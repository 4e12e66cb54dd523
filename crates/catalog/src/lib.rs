//! Catalog domain module.
//!
//! This crate contains business rules for stock records (reference + color
//! variants with per-size stock grids) and the derived grouping views used
//! to present them, implemented purely as deterministic domain logic (no IO,
//! no HTTP, no storage).

pub mod grouping;
pub mod record;

pub use grouping::{
    group_by_color, group_by_image, grade_range, ColorGroup, GradeRange, ImageGroup,
};
pub use record::StockRecord;
