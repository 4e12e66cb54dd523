//! Per-size stock quantities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::size::Size;
use crate::value_object::ValueObject;

/// A mapping from size label to non-negative quantity.
///
/// Backed by a `BTreeMap` so iteration always follows the canonical size
/// order. A key may hold an explicit zero: a size that once carried stock
/// keeps its row at 0, while a size that never existed is simply absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeGrid(BTreeMap<Size, u32>);

impl SizeGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity for a size; absent sizes read as zero.
    pub fn quantity(&self, size: Size) -> u32 {
        self.0.get(&size).copied().unwrap_or(0)
    }

    /// Whether the grid carries an entry for this size (even a zero one).
    pub fn contains(&self, size: Size) -> bool {
        self.0.contains_key(&size)
    }

    /// Set the quantity for a size, creating the entry if needed.
    pub fn set(&mut self, size: Size, quantity: u32) {
        self.0.insert(size, quantity);
    }

    /// Sum of all quantities.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in canonical size order.
    pub fn iter(&self) -> impl Iterator<Item = (Size, u32)> + '_ {
        self.0.iter().map(|(size, qty)| (*size, *qty))
    }

    /// Sizes carried by this grid, in canonical order.
    pub fn sizes(&self) -> impl Iterator<Item = Size> + '_ {
        self.0.keys().copied()
    }
}

impl ValueObject for SizeGrid {}

impl FromIterator<(Size, u32)> for SizeGrid {
    fn from_iter<T: IntoIterator<Item = (Size, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_sizes_read_as_zero() {
        let grid = SizeGrid::new();
        assert_eq!(grid.quantity(Size::P), 0);
        assert!(!grid.contains(Size::P));
    }

    #[test]
    fn explicit_zero_keeps_the_entry() {
        let mut grid = SizeGrid::new();
        grid.set(Size::M, 4);
        grid.set(Size::M, 0);
        assert!(grid.contains(Size::M));
        assert_eq!(grid.quantity(Size::M), 0);
        assert_eq!(grid.total(), 0);
    }

    #[test]
    fn total_sums_all_entries() {
        let grid: SizeGrid = [(Size::P, 2), (Size::GG, 3), (Size::G1, 5)].into_iter().collect();
        assert_eq!(grid.total(), 10);
    }

    #[test]
    fn iteration_follows_canonical_order() {
        let grid: SizeGrid = [(Size::G3, 1), (Size::P, 1), (Size::GG, 1)].into_iter().collect();
        let sizes: Vec<Size> = grid.sizes().collect();
        assert_eq!(sizes, vec![Size::P, Size::GG, Size::G3]);
    }
}
