//! Candidate resolution for ambiguous (color, size) adjustments.

use atelier_catalog::StockRecord;
use atelier_core::Size;

/// Pick which record an adjustment against a color block targets when
/// several records share the same color and size key.
///
/// Policy: the first candidate, in original order, that already has a
/// nonzero quantity for the size; if none has one, the first candidate
/// regardless of stock. Deterministic and order-stable; never random,
/// never "most total stock".
pub fn resolve_candidate<'a>(candidates: &'a [StockRecord], size: Size) -> Option<&'a StockRecord> {
    candidates
        .iter()
        .find(|record| record.quantity(size) > 0)
        .or_else(|| candidates.first())
}
