//! Stock and outflow value reporting.

use serde::Serialize;

use atelier_catalog::StockRecord;
use atelier_core::RecordId;
use atelier_ledger::{Direction, StockTransaction};

use crate::dashboard::LOW_STOCK_THRESHOLD;

/// One record flagged by the report tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockLine {
    pub record_id: RecordId,
    pub reference: String,
    pub name: String,
    pub color: String,
    pub total: u32,
}

impl StockLine {
    fn from_record(record: &StockRecord) -> Self {
        Self {
            record_id: record.record_id(),
            reference: record.reference().to_string(),
            name: record.name().to_string(),
            color: record.color().to_string(),
            total: record.total(),
        }
    }
}

/// Financial and availability report over the current catalog plus the
/// loaded transaction window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockReport {
    /// Σ units × unit price, for records that carry a price.
    pub stock_value_cents: u64,
    /// Σ outbound quantity × the record's *current* price. An estimate, not
    /// an invoice total.
    pub outflow_value_cents: u64,
    pub total_units: u64,
    pub out_of_stock_count: usize,
    /// Records with some stock but fewer than the low-stock threshold.
    pub low_stock: Vec<StockLine>,
    /// Records with zero units.
    pub out_of_stock: Vec<StockLine>,
}

pub fn build_report(records: &[StockRecord], transactions: &[StockTransaction]) -> StockReport {
    let stock_value_cents = records
        .iter()
        .map(|r| u64::from(r.total()) * r.price_cents().unwrap_or(0))
        .sum();

    let outflow_value_cents = transactions
        .iter()
        .filter(|t| t.direction == Direction::Out)
        .map(|t| {
            let price = records
                .iter()
                .find(|r| r.record_id() == t.record_id)
                .and_then(|r| r.price_cents())
                .unwrap_or(0);
            u64::from(t.quantity) * price
        })
        .sum();

    let total_units = records.iter().map(|r| u64::from(r.total())).sum();

    let low_stock = records
        .iter()
        .filter(|r| r.total() > 0 && r.total() < LOW_STOCK_THRESHOLD)
        .map(StockLine::from_record)
        .collect();
    let out_of_stock: Vec<StockLine> = records
        .iter()
        .filter(|r| r.total() == 0)
        .map(StockLine::from_record)
        .collect();

    StockReport {
        stock_value_cents,
        outflow_value_cents,
        total_units,
        out_of_stock_count: out_of_stock.len(),
        low_stock,
        out_of_stock,
    }
}
