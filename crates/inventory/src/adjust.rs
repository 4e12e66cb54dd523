//! Single interactive stock adjustments.
//!
//! Unlike the trusted bulk path in [`crate::batch`], the interactive path is
//! safety-checked: an outbound movement may never exceed the currently known
//! stock of the resolved record, and validation happens before any write is
//! attempted.

use chrono::{DateTime, Utc};

use atelier_catalog::StockRecord;
use atelier_core::{CustomerId, DomainError, DomainResult, Size};
use atelier_ledger::{Direction, StockTransaction};

use crate::batch::RecordUpdate;

/// Outcome of planning a single adjustment: one aggregate update and one
/// transaction, applied together by the caller.
#[derive(Debug, Clone)]
pub struct AdjustmentPlan {
    pub update: RecordUpdate,
    pub transaction: StockTransaction,
}

/// Validate a single adjustment against the currently known stock.
///
/// - quantity must be a positive integer;
/// - `Out` must not exceed the stock for this exact (record, size); the
///   check targets the resolved record, never an aggregate across a color
///   group;
/// - `In` has no upper bound.
pub fn validate_adjustment(
    record: &StockRecord,
    size: Size,
    direction: Direction,
    quantity: u32,
) -> DomainResult<()> {
    if quantity == 0 {
        return Err(DomainError::validation("quantity must be positive"));
    }

    if direction == Direction::Out {
        let available = record.quantity(size);
        if quantity > available {
            return Err(DomainError::insufficient_stock(available, quantity));
        }
    }

    Ok(())
}

/// Validate and plan a single adjustment.
///
/// Customer attribution is only solicited for outbound movements; it is
/// ignored on `In`. The caller supplies the timestamp.
pub fn plan_adjustment(
    record: &StockRecord,
    size: Size,
    direction: Direction,
    quantity: u32,
    customer: Option<(CustomerId, String)>,
    recorded_at: DateTime<Utc>,
) -> DomainResult<AdjustmentPlan> {
    validate_adjustment(record, size, direction, quantity)?;

    let current = record.quantity(size);
    let new_quantity = match direction {
        Direction::In => current.checked_add(quantity).ok_or_else(|| {
            DomainError::validation("quantity overflows the stock counter")
        })?,
        Direction::Out => current - quantity,
    };

    let mut stocks = record.stocks().clone();
    stocks.set(size, new_quantity);

    let transaction = match direction {
        Direction::In => {
            StockTransaction::inbound(record.record_id(), record.name(), size, quantity, recorded_at)?
        }
        Direction::Out => StockTransaction::outbound(
            record.record_id(),
            record.name(),
            size,
            quantity,
            recorded_at,
            customer,
        )?,
    };

    Ok(AdjustmentPlan {
        update: RecordUpdate {
            record_id: record.record_id(),
            total: stocks.total(),
            stocks,
        },
        transaction,
    })
}
