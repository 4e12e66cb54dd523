//! Bulk grid edits → minimal transaction batches.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_catalog::StockRecord;
use atelier_core::{RecordId, Size, SizeGrid, TransactionId};
use atelier_ledger::{Direction, StockTransaction};

/// One edited cell from a grid view: "this record's quantity for this size
/// should now be `quantity`".
///
/// Absence of a cell means "unchanged": callers submit only the cells the
/// operator actually touched. Quantities are non-negative by type; callers
/// coerce malformed or negative entries to zero before building edits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEdit {
    pub record_id: RecordId,
    pub size: Size,
    pub quantity: u32,
}

/// Replacement of one record's whole stock grid plus its recomputed total.
///
/// One of these is emitted per affected record: a single aggregate write,
/// not one write per transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub record_id: RecordId,
    pub stocks: SizeGrid,
    pub total: u32,
}

/// The outcome of planning a batch: aggregate updates and the ordered
/// transaction list that together reconcile old state to the edited state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchPlan {
    pub updates: Vec<RecordUpdate>,
    pub transactions: Vec<StockTransaction>,
}

impl BatchPlan {
    /// True when the edits amounted to a no-op.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.transactions.is_empty()
    }
}

/// Lookup of current records by identifier, the read collaborator of the
/// planner.
pub trait RecordLookup {
    fn record(&self, id: &RecordId) -> Option<&StockRecord>;
}

impl RecordLookup for [StockRecord] {
    fn record(&self, id: &RecordId) -> Option<&StockRecord> {
        self.iter().find(|r| r.record_id() == *id)
    }
}

impl RecordLookup for Vec<StockRecord> {
    fn record(&self, id: &RecordId) -> Option<&StockRecord> {
        self.as_slice().record(id)
    }
}

impl RecordLookup for HashMap<RecordId, StockRecord> {
    fn record(&self, id: &RecordId) -> Option<&StockRecord> {
        self.get(id)
    }
}

/// Convert a bulk grid edit into the smallest equivalent set of directional
/// transactions, plus one aggregate update per affected record.
///
/// Per record: the proposed quantities are overlaid on the current grid (a
/// size absent from the grid with a proposed quantity of zero stays absent),
/// then the signed diff is taken for every size in the canonical set. A zero
/// diff emits nothing; a positive diff emits one `IN`, a negative diff one
/// `OUT` of the absolute value. Outbound diffs are *not* floor-checked here:
/// the grid was populated from a recent read and is trusted at submission
/// time, unlike the interactive single-adjustment path.
///
/// Edits referencing an unknown record are dropped without error. A later
/// edit of the same cell overrides an earlier one. Transactions are ordered
/// by record first-appearance, then canonical size order. `recorded_at` is
/// stamped on every transaction; transaction identifiers are generated here.
pub fn plan_batch<L>(records: &L, edits: &[CellEdit], recorded_at: DateTime<Utc>) -> BatchPlan
where
    L: RecordLookup + ?Sized,
{
    let mut order: Vec<RecordId> = Vec::new();
    let mut proposed: HashMap<RecordId, BTreeMap<Size, u32>> = HashMap::new();

    for edit in edits {
        let cells = proposed.entry(edit.record_id).or_insert_with(|| {
            order.push(edit.record_id);
            BTreeMap::new()
        });
        cells.insert(edit.size, edit.quantity);
    }

    let mut plan = BatchPlan::default();

    for record_id in order {
        let Some(record) = records.record(&record_id) else {
            tracing::debug!(record_id = %record_id, "dropping edits for unknown record");
            continue;
        };

        let old = record.stocks();
        let mut new_stocks = old.clone();
        for (&size, &quantity) in &proposed[&record_id] {
            // An absent size proposed at zero never existed; keep it absent.
            if old.contains(size) || quantity > 0 {
                new_stocks.set(size, quantity);
            }
        }

        let mut transactions = Vec::new();
        for size in Size::ALL {
            let before = old.quantity(size);
            let after = new_stocks.quantity(size);
            if after == before {
                continue;
            }
            let (direction, quantity) = if after > before {
                (Direction::In, after - before)
            } else {
                (Direction::Out, before - after)
            };
            transactions.push(StockTransaction {
                id: TransactionId::new(),
                record_id,
                product_name: record.name().to_string(),
                direction,
                quantity,
                size,
                recorded_at,
                customer_id: None,
                customer_name: None,
            });
        }

        if transactions.is_empty() {
            continue;
        }

        plan.updates.push(RecordUpdate {
            record_id,
            total: new_stocks.total(),
            stocks: new_stocks,
        });
        plan.transactions.extend(transactions);
    }

    plan
}
