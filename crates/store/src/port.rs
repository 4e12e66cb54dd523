use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use atelier_catalog::StockRecord;
use atelier_core::{CustomerId, RecordId};
use atelier_customers::Customer;
use atelier_inventory::RecordUpdate;
use atelier_ledger::StockTransaction;

/// Store operation error.
///
/// These are **infrastructure failures** (connectivity, backend refusals),
/// as opposed to domain errors (validation, invariants). Reads and writes
/// fail independently; the caller decides how to recover (the application
/// layer aborts a batch on the first failure and re-reads authoritative
/// state).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached or failed mid-operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The targeted row does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend refused the write (constraint violation, bad payload).
    #[error("write rejected: {0}")]
    Rejected(String),
}

/// Remote store for the three record types.
///
/// The port mirrors what the application actually does against the backend:
/// whole-table reads on load/refresh, one aggregate update per affected
/// record, and one append call carrying a batch's full ordered transaction
/// list. Identifiers are always generated by the caller; the store never
/// assigns them. Transactions are append-only; there is no way
/// to mutate or delete one.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn load_records(&self) -> Result<Vec<StockRecord>, StoreError>;

    /// Newest-first, capped at `limit`.
    async fn load_recent_transactions(
        &self,
        limit: usize,
    ) -> Result<Vec<StockTransaction>, StoreError>;

    async fn load_customers(&self) -> Result<Vec<Customer>, StoreError>;

    async fn insert_records(&self, records: Vec<StockRecord>) -> Result<(), StoreError>;

    /// Replace the identity fields of an existing record.
    async fn update_record(&self, record: StockRecord) -> Result<(), StoreError>;

    /// Replace one record's stock grid and total in a single write.
    async fn update_stock_aggregate(&self, update: &RecordUpdate) -> Result<(), StoreError>;

    /// Append a batch's transactions to the ledger (append-only).
    async fn append_transactions(
        &self,
        transactions: Vec<StockTransaction>,
    ) -> Result<(), StoreError>;

    async fn delete_record(&self, id: RecordId) -> Result<(), StoreError>;

    async fn insert_customer(&self, customer: Customer) -> Result<(), StoreError>;

    async fn delete_customer(&self, id: CustomerId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    async fn load_records(&self) -> Result<Vec<StockRecord>, StoreError> {
        (**self).load_records().await
    }

    async fn load_recent_transactions(
        &self,
        limit: usize,
    ) -> Result<Vec<StockTransaction>, StoreError> {
        (**self).load_recent_transactions(limit).await
    }

    async fn load_customers(&self) -> Result<Vec<Customer>, StoreError> {
        (**self).load_customers().await
    }

    async fn insert_records(&self, records: Vec<StockRecord>) -> Result<(), StoreError> {
        (**self).insert_records(records).await
    }

    async fn update_record(&self, record: StockRecord) -> Result<(), StoreError> {
        (**self).update_record(record).await
    }

    async fn update_stock_aggregate(&self, update: &RecordUpdate) -> Result<(), StoreError> {
        (**self).update_stock_aggregate(update).await
    }

    async fn append_transactions(
        &self,
        transactions: Vec<StockTransaction>,
    ) -> Result<(), StoreError> {
        (**self).append_transactions(transactions).await
    }

    async fn delete_record(&self, id: RecordId) -> Result<(), StoreError> {
        (**self).delete_record(id).await
    }

    async fn insert_customer(&self, customer: Customer) -> Result<(), StoreError> {
        (**self).insert_customer(customer).await
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<(), StoreError> {
        (**self).delete_customer(id).await
    }
}
