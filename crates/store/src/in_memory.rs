use std::sync::RwLock;

use async_trait::async_trait;

use atelier_catalog::StockRecord;
use atelier_core::{CustomerId, Entity, RecordId};
use atelier_customers::Customer;
use atelier_inventory::RecordUpdate;
use atelier_ledger::StockTransaction;

use crate::port::{CatalogStore, StoreError};

/// In-memory store implementation.
///
/// Intended for tests/dev. Tables keep insertion order; the transaction log
/// is append-only. The `fail_*` knobs let a test inject one read or write
/// failure to exercise the abort-and-refresh policy.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<StockRecord>>,
    transactions: RwLock<Vec<StockTransaction>>,
    customers: RwLock<Vec<Customer>>,
    write_failure: RwLock<Option<(usize, String)>>,
    read_failure: RwLock<Option<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next write operation fail with `reason`, once.
    pub fn fail_next_write(&self, reason: impl Into<String>) {
        self.fail_write_after(0, reason);
    }

    /// Let `skip` write operations succeed, then fail the next one, once.
    pub fn fail_write_after(&self, skip: usize, reason: impl Into<String>) {
        if let Ok(mut slot) = self.write_failure.write() {
            *slot = Some((skip, reason.into()));
        }
    }

    /// Make the next read operation fail with `reason`, once.
    pub fn fail_next_read(&self, reason: impl Into<String>) {
        if let Ok(mut slot) = self.read_failure.write() {
            *slot = Some(reason.into());
        }
    }

    /// Number of transactions ever appended.
    pub fn transaction_count(&self) -> usize {
        self.transactions.read().map(|log| log.len()).unwrap_or(0)
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("lock poisoned".to_string())
    }

    fn take_injected_failure(&self) -> Result<(), StoreError> {
        let mut slot = self.write_failure.write().map_err(|_| Self::poisoned())?;
        if let Some((skip, reason)) = slot.take() {
            if skip == 0 {
                tracing::warn!(reason = %reason, "injected write failure");
                return Err(StoreError::Unavailable(reason));
            }
            *slot = Some((skip - 1, reason));
        }
        Ok(())
    }

    fn take_injected_read_failure(&self) -> Result<(), StoreError> {
        let mut slot = self.read_failure.write().map_err(|_| Self::poisoned())?;
        if let Some(reason) = slot.take() {
            tracing::warn!(reason = %reason, "injected read failure");
            return Err(StoreError::Unavailable(reason));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn load_records(&self) -> Result<Vec<StockRecord>, StoreError> {
        self.take_injected_read_failure()?;
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.clone())
    }

    async fn load_recent_transactions(
        &self,
        limit: usize,
    ) -> Result<Vec<StockTransaction>, StoreError> {
        self.take_injected_read_failure()?;
        let log = self.transactions.read().map_err(|_| Self::poisoned())?;

        // Newest first; among equal timestamps the later-appended entry wins.
        let mut recent: Vec<StockTransaction> = log.iter().rev().cloned().collect();
        recent.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn load_customers(&self) -> Result<Vec<Customer>, StoreError> {
        self.take_injected_read_failure()?;
        let customers = self.customers.read().map_err(|_| Self::poisoned())?;
        Ok(customers.clone())
    }

    async fn insert_records(&self, new_records: Vec<StockRecord>) -> Result<(), StoreError> {
        self.take_injected_failure()?;
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;

        for record in &new_records {
            if records.iter().any(|r| r.id() == record.id()) {
                return Err(StoreError::Rejected(format!(
                    "record {} already exists",
                    record.record_id()
                )));
            }
        }

        tracing::debug!(count = new_records.len(), "inserting records");
        records.extend(new_records);
        Ok(())
    }

    async fn update_record(&self, updated: StockRecord) -> Result<(), StoreError> {
        self.take_injected_failure()?;
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;

        let Some(slot) = records.iter_mut().find(|r| r.id() == updated.id()) else {
            return Err(StoreError::NotFound(format!(
                "record {}",
                updated.record_id()
            )));
        };
        *slot = updated;
        Ok(())
    }

    async fn update_stock_aggregate(&self, update: &RecordUpdate) -> Result<(), StoreError> {
        self.take_injected_failure()?;
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;

        let Some(record) = records.iter_mut().find(|r| r.record_id() == update.record_id)
        else {
            return Err(StoreError::NotFound(format!("record {}", update.record_id)));
        };

        record
            .apply_stock_update(update.stocks.clone(), update.total)
            .map_err(|e| StoreError::Rejected(e.to_string()))?;

        tracing::debug!(record_id = %update.record_id, total = update.total, "stock aggregate updated");
        Ok(())
    }

    async fn append_transactions(
        &self,
        transactions: Vec<StockTransaction>,
    ) -> Result<(), StoreError> {
        self.take_injected_failure()?;
        let mut log = self.transactions.write().map_err(|_| Self::poisoned())?;
        tracing::debug!(count = transactions.len(), "appending transactions");
        log.extend(transactions);
        Ok(())
    }

    async fn delete_record(&self, id: RecordId) -> Result<(), StoreError> {
        self.take_injected_failure()?;
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;

        let before = records.len();
        records.retain(|r| r.record_id() != id);
        if records.len() == before {
            return Err(StoreError::NotFound(format!("record {id}")));
        }
        Ok(())
    }

    async fn insert_customer(&self, customer: Customer) -> Result<(), StoreError> {
        self.take_injected_failure()?;
        let mut customers = self.customers.write().map_err(|_| Self::poisoned())?;

        if customers.iter().any(|c| c.id() == customer.id()) {
            return Err(StoreError::Rejected(format!(
                "customer {} already exists",
                customer.customer_id()
            )));
        }
        customers.push(customer);
        Ok(())
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<(), StoreError> {
        self.take_injected_failure()?;
        let mut customers = self.customers.write().map_err(|_| Self::poisoned())?;

        let before = customers.len();
        customers.retain(|c| c.customer_id() != id);
        if customers.len() == before {
            return Err(StoreError::NotFound(format!("customer {id}")));
        }
        Ok(())
    }
}
