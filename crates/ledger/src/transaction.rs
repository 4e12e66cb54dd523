use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_core::{CustomerId, DomainError, DomainResult, RecordId, Size, TransactionId};

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Stock-in: increases the quantity for a size.
    In,
    /// Stock-out: decreases the quantity for a size.
    Out,
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Direction::In => f.write_str("IN"),
            Direction::Out => f.write_str("OUT"),
        }
    }
}

/// One immutable inventory movement.
///
/// The product name (and customer name, when attributed) are denormalized:
/// captured at write time and never re-derived, so the audit trail stays
/// readable even after the record or customer is gone. Timestamps are
/// produced by the caller at construction time (`DateTime<Utc>`, RFC 3339 on
/// the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: TransactionId,
    pub record_id: RecordId,
    pub product_name: String,
    pub direction: Direction,
    pub quantity: u32,
    pub size: Size,
    pub recorded_at: DateTime<Utc>,
    pub customer_id: Option<CustomerId>,
    pub customer_name: Option<String>,
}

impl StockTransaction {
    /// A stock-in movement. Inbound movements carry no customer attribution.
    pub fn inbound(
        record_id: RecordId,
        product_name: impl Into<String>,
        size: Size,
        quantity: u32,
        recorded_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Self::build(
            record_id,
            product_name,
            Direction::In,
            size,
            quantity,
            recorded_at,
            None,
        )
    }

    /// A stock-out movement, optionally attributed to a customer.
    pub fn outbound(
        record_id: RecordId,
        product_name: impl Into<String>,
        size: Size,
        quantity: u32,
        recorded_at: DateTime<Utc>,
        customer: Option<(CustomerId, String)>,
    ) -> DomainResult<Self> {
        Self::build(
            record_id,
            product_name,
            Direction::Out,
            size,
            quantity,
            recorded_at,
            customer,
        )
    }

    fn build(
        record_id: RecordId,
        product_name: impl Into<String>,
        direction: Direction,
        size: Size,
        quantity: u32,
        recorded_at: DateTime<Utc>,
        customer: Option<(CustomerId, String)>,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        let (customer_id, customer_name) = match customer {
            Some((id, name)) => (Some(id), Some(name)),
            None => (None, None),
        };

        Ok(Self {
            id: TransactionId::new(),
            record_id,
            product_name: product_name.into(),
            direction,
            quantity,
            size,
            recorded_at,
            customer_id,
            customer_name,
        })
    }

    /// Quantity signed by direction: positive for `In`, negative for `Out`.
    pub fn signed_quantity(&self) -> i64 {
        match self.direction {
            Direction::In => i64::from(self.quantity),
            Direction::Out => -i64::from(self.quantity),
        }
    }
}
