//! Orchestration of the catalog against the remote store.
//!
//! The service owns a reconciled local copy of the remote state. The
//! reconciliation rule is uniform: local state changes only after the remote
//! call is acknowledged; on any write failure the remaining calls of the
//! operation are aborted and a full re-read is triggered so the local copy
//! never silently diverges from a partially-applied remote state.

use chrono::Utc;
use serde::Serialize;

use atelier_catalog::{group_by_image, ImageGroup, StockRecord};
use atelier_core::{CustomerId, DomainError, Entity, RecordId, Size};
use atelier_customers::Customer;
use atelier_inventory::{plan_adjustment, plan_batch, BatchPlan, CellEdit, RecordUpdate};
use atelier_ledger::{Direction, StockTransaction};
use atelier_store::CatalogStore;

use crate::dashboard::{self, DashboardSummary};
use crate::error::AppError;
use crate::reports::{self, StockReport};
use crate::session::Session;

/// How many ledger entries the service keeps in memory (newest first).
pub const RECENT_TRANSACTION_LIMIT: usize = 100;

/// Where the service stands with respect to the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing loaded yet (or a load is underway).
    Loading,
    /// State mirrors a successful full read.
    Ready,
    /// The last full read failed; no data is exposed.
    Failed(String),
}

/// Counts reported back after a batch submission.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub records_updated: usize,
    pub transactions_recorded: usize,
}

/// Application service over a [`CatalogStore`].
pub struct InventoryService<S> {
    store: S,
    phase: LoadPhase,
    records: Vec<StockRecord>,
    transactions: Vec<StockTransaction>,
    customers: Vec<Customer>,
}

impl<S: CatalogStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            phase: LoadPhase::Loading,
            records: Vec::new(),
            transactions: Vec::new(),
            customers: Vec::new(),
        }
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    /// Full re-read of authoritative state.
    ///
    /// On any read failure the service clears its state and stays in the
    /// failed phase rather than presenting stale or default data.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        self.phase = LoadPhase::Loading;
        match self.load_all().await {
            Ok((records, transactions, customers)) => {
                self.records = records;
                self.transactions = transactions;
                self.customers = customers;
                self.phase = LoadPhase::Ready;
                tracing::info!(
                    records = self.records.len(),
                    transactions = self.transactions.len(),
                    customers = self.customers.len(),
                    "catalog state refreshed"
                );
                Ok(())
            }
            Err(e) => {
                self.records.clear();
                self.transactions.clear();
                self.customers.clear();
                self.phase = LoadPhase::Failed(e.to_string());
                tracing::error!(error = %e, "catalog refresh failed");
                Err(e.into())
            }
        }
    }

    async fn load_all(
        &self,
    ) -> Result<(Vec<StockRecord>, Vec<StockTransaction>, Vec<Customer>), atelier_store::StoreError>
    {
        let records = self.store.load_records().await?;
        let transactions = self
            .store
            .load_recent_transactions(RECENT_TRANSACTION_LIMIT)
            .await?;
        let customers = self.store.load_customers().await?;
        Ok((records, transactions, customers))
    }

    fn ready(&self) -> Result<(), AppError> {
        if self.phase == LoadPhase::Ready {
            Ok(())
        } else {
            Err(AppError::NotReady)
        }
    }

    pub fn records(&self) -> Result<&[StockRecord], AppError> {
        self.ready()?;
        Ok(&self.records)
    }

    pub fn transactions(&self) -> Result<&[StockTransaction], AppError> {
        self.ready()?;
        Ok(&self.transactions)
    }

    pub fn customers(&self) -> Result<&[Customer], AppError> {
        self.ready()?;
        Ok(&self.customers)
    }

    /// Catalog presentation view: records grouped by image reference.
    pub fn image_groups(&self) -> Result<Vec<ImageGroup<'_>>, AppError> {
        self.ready()?;
        Ok(group_by_image(&self.records))
    }

    pub fn dashboard(&self) -> Result<DashboardSummary, AppError> {
        self.ready()?;
        Ok(dashboard::summarize(&self.records))
    }

    pub fn report(&self) -> Result<StockReport, AppError> {
        self.ready()?;
        Ok(reports::build_report(&self.records, &self.transactions))
    }

    /// Submit a bulk grid edit.
    ///
    /// The edit is planned against the current local records, then applied
    /// remotely as one aggregate update per affected record followed by one
    /// transaction append. The first failing call aborts the rest and
    /// triggers a full refresh; there is no automatic retry.
    pub async fn submit_batch(
        &mut self,
        session: &Session,
        edits: &[CellEdit],
    ) -> Result<BatchOutcome, AppError> {
        session.require_admin()?;
        self.ready()?;

        let plan = plan_batch(&self.records, edits, Utc::now());
        if plan.is_empty() {
            return Ok(BatchOutcome::default());
        }

        for update in &plan.updates {
            if let Err(e) = self.store.update_stock_aggregate(update).await {
                tracing::error!(record_id = %update.record_id, error = %e, "batch aborted on aggregate update");
                self.recover_after_write_failure().await;
                return Err(e.into());
            }
        }

        if let Err(e) = self.store.append_transactions(plan.transactions.clone()).await {
            tracing::error!(error = %e, "batch aborted on transaction append");
            self.recover_after_write_failure().await;
            return Err(e.into());
        }

        let outcome = BatchOutcome {
            records_updated: plan.updates.len(),
            transactions_recorded: plan.transactions.len(),
        };
        self.apply_acknowledged_plan(plan);
        Ok(outcome)
    }

    /// One interactive adjustment: a single (record, size) cell moved in one
    /// direction, validated before any write.
    pub async fn adjust_stock(
        &mut self,
        session: &Session,
        record_id: RecordId,
        size: Size,
        direction: Direction,
        quantity: u32,
        customer_id: Option<CustomerId>,
    ) -> Result<(), AppError> {
        session.require_admin()?;
        self.ready()?;

        let plan = {
            let record = self
                .records
                .iter()
                .find(|r| r.record_id() == record_id)
                .ok_or(DomainError::NotFound)?;

            let customer = match customer_id {
                Some(id) => {
                    let customer = self
                        .customers
                        .iter()
                        .find(|c| c.customer_id() == id)
                        .ok_or(DomainError::NotFound)?;
                    Some((customer.customer_id(), customer.name().to_string()))
                }
                None => None,
            };

            plan_adjustment(record, size, direction, quantity, customer, Utc::now())?
        };

        if let Err(e) = self.store.update_stock_aggregate(&plan.update).await {
            tracing::error!(record_id = %record_id, error = %e, "adjustment aborted on aggregate update");
            self.recover_after_write_failure().await;
            return Err(e.into());
        }
        if let Err(e) = self
            .store
            .append_transactions(vec![plan.transaction.clone()])
            .await
        {
            tracing::error!(record_id = %record_id, error = %e, "adjustment aborted on transaction append");
            self.recover_after_write_failure().await;
            return Err(e.into());
        }

        self.apply_acknowledged_plan(BatchPlan {
            updates: vec![plan.update],
            transactions: vec![plan.transaction],
        });
        Ok(())
    }

    /// Register new records and seed the ledger with one inbound transaction
    /// per nonzero size cell.
    pub async fn add_records(
        &mut self,
        session: &Session,
        records: Vec<StockRecord>,
    ) -> Result<(), AppError> {
        session.require_admin()?;
        self.ready()?;

        let now = Utc::now();
        let mut seed_transactions = Vec::new();
        for record in &records {
            for (size, quantity) in record.stocks().iter() {
                if quantity > 0 {
                    seed_transactions.push(StockTransaction::inbound(
                        record.record_id(),
                        record.name(),
                        size,
                        quantity,
                        now,
                    )?);
                }
            }
        }

        if let Err(e) = self.store.insert_records(records).await {
            tracing::error!(error = %e, "record insert failed");
            self.recover_after_write_failure().await;
            return Err(e.into());
        }
        if !seed_transactions.is_empty() {
            if let Err(e) = self.store.append_transactions(seed_transactions).await {
                tracing::error!(error = %e, "initial transaction append failed");
                self.recover_after_write_failure().await;
                return Err(e.into());
            }
        }

        self.refresh().await
    }

    /// Edit the identity fields of one record.
    pub async fn update_record_details(
        &mut self,
        session: &Session,
        record_id: RecordId,
        reference: &str,
        name: &str,
        price_cents: Option<u64>,
    ) -> Result<(), AppError> {
        session.require_admin()?;
        self.ready()?;

        let mut updated = self
            .records
            .iter()
            .find(|r| r.record_id() == record_id)
            .ok_or(DomainError::NotFound)?
            .clone();
        updated.edit_details(reference, name, price_cents)?;

        if let Err(e) = self.store.update_record(updated.clone()).await {
            tracing::error!(record_id = %record_id, error = %e, "record update failed");
            self.recover_after_write_failure().await;
            return Err(e.into());
        }
        self.replace_local_record(updated);
        Ok(())
    }

    /// Rename a whole color block: every given record gets the new color
    /// name and hex (and its display name substituted).
    pub async fn rename_color(
        &mut self,
        session: &Session,
        record_ids: &[RecordId],
        color: &str,
        color_hex: Option<String>,
    ) -> Result<(), AppError> {
        session.require_admin()?;
        self.ready()?;

        for record_id in record_ids {
            let mut updated = self
                .records
                .iter()
                .find(|r| r.record_id() == *record_id)
                .ok_or(DomainError::NotFound)?
                .clone();
            updated.rename_color(color, color_hex.clone())?;

            if let Err(e) = self.store.update_record(updated.clone()).await {
                tracing::error!(record_id = %record_id, error = %e, "color rename aborted");
                self.recover_after_write_failure().await;
                return Err(e.into());
            }
            self.replace_local_record(updated);
        }
        Ok(())
    }

    pub async fn delete_record(
        &mut self,
        session: &Session,
        record_id: RecordId,
    ) -> Result<(), AppError> {
        session.require_admin()?;
        self.ready()?;

        if let Err(e) = self.store.delete_record(record_id).await {
            tracing::error!(record_id = %record_id, error = %e, "record delete failed");
            self.recover_after_write_failure().await;
            return Err(e.into());
        }
        self.records.retain(|r| r.record_id() != record_id);
        Ok(())
    }

    pub async fn add_customer(
        &mut self,
        session: &Session,
        customer: Customer,
    ) -> Result<(), AppError> {
        session.require_admin()?;
        self.ready()?;

        if let Err(e) = self.store.insert_customer(customer.clone()).await {
            tracing::error!(customer_id = %customer.customer_id(), error = %e, "customer insert failed");
            self.recover_after_write_failure().await;
            return Err(e.into());
        }
        self.customers.push(customer);
        Ok(())
    }

    pub async fn delete_customer(
        &mut self,
        session: &Session,
        customer_id: CustomerId,
    ) -> Result<(), AppError> {
        session.require_admin()?;
        self.ready()?;

        if let Err(e) = self.store.delete_customer(customer_id).await {
            tracing::error!(customer_id = %customer_id, error = %e, "customer delete failed");
            self.recover_after_write_failure().await;
            return Err(e.into());
        }
        self.customers.retain(|c| c.customer_id() != customer_id);
        Ok(())
    }

    /// Apply an acknowledged plan to the local copy.
    fn apply_acknowledged_plan(&mut self, plan: BatchPlan) {
        for update in plan.updates {
            self.apply_local_update(update);
        }

        let mut merged = plan.transactions;
        merged.append(&mut self.transactions);
        merged.truncate(RECENT_TRANSACTION_LIMIT);
        self.transactions = merged;
    }

    fn apply_local_update(&mut self, update: RecordUpdate) {
        let Some(record) = self
            .records
            .iter_mut()
            .find(|r| r.record_id() == update.record_id)
        else {
            tracing::warn!(record_id = %update.record_id, "acknowledged update targets a record missing locally");
            return;
        };
        if let Err(e) = record.apply_stock_update(update.stocks, update.total) {
            tracing::warn!(record_id = %update.record_id, error = %e, "acknowledged update was inconsistent; keeping previous state");
        }
    }

    fn replace_local_record(&mut self, updated: StockRecord) {
        if let Some(slot) = self.records.iter_mut().find(|r| r.id() == updated.id()) {
            *slot = updated;
        }
    }

    async fn recover_after_write_failure(&mut self) {
        if self.refresh().await.is_err() {
            tracing::error!("re-read after write failure also failed; state withheld until the next refresh");
        }
    }
}
