//! Black-box tests of the application service against the in-memory store.

use std::sync::Arc;

use atelier_app::{login, AdminCredentials, AppError, InventoryService, LoadPhase, Session};
use atelier_catalog::StockRecord;
use atelier_core::{CustomerId, DomainError, RecordId, Size};
use atelier_customers::Customer;
use atelier_inventory::CellEdit;
use atelier_ledger::Direction;
use atelier_store::{CatalogStore, InMemoryStore};

fn record(reference: &str, color: &str, stocks: &[(Size, u32)]) -> StockRecord {
    StockRecord::new(
        RecordId::new(),
        reference,
        format!("{reference} - {color}"),
        color,
        stocks.iter().copied().collect(),
    )
    .unwrap()
    .with_price_cents(10_000)
}

fn admin_session() -> Session {
    let credentials = AdminCredentials::new("gerente", "s3nha");
    login(&credentials, "gerente", "s3nha").unwrap()
}

async fn seeded_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store
        .insert_records(vec![
            record("VES-021", "Preto", &[(Size::P, 2), (Size::M, 0)]),
            record("BLU-007", "Rosa", &[(Size::G1, 4)]),
        ])
        .await
        .unwrap();
    store
        .insert_customer(
            Customer::new(CustomerId::new(), "Maria Silva", "+55 11 98888-0000", None).unwrap(),
        )
        .await
        .unwrap();
    store
}

async fn ready_service() -> (Arc<InMemoryStore>, InventoryService<Arc<InMemoryStore>>) {
    let store = seeded_store().await;
    let mut service = InventoryService::new(Arc::clone(&store));
    service.refresh().await.unwrap();
    (store, service)
}

fn find<'a>(records: &'a [StockRecord], reference: &str) -> &'a StockRecord {
    records
        .iter()
        .find(|r| r.reference() == reference)
        .unwrap()
}

#[tokio::test]
async fn refresh_loads_all_three_collections() {
    let (_store, service) = ready_service().await;
    assert_eq!(*service.phase(), LoadPhase::Ready);
    assert_eq!(service.records().unwrap().len(), 2);
    assert_eq!(service.customers().unwrap().len(), 1);
    assert!(service.transactions().unwrap().is_empty());
}

#[tokio::test]
async fn read_failure_withholds_all_state() {
    let store = seeded_store().await;
    store.fail_next_read("backend offline");

    let mut service = InventoryService::new(Arc::clone(&store));
    let err = service.refresh().await.unwrap_err();
    assert!(err.is_remote());
    assert!(matches!(service.phase(), LoadPhase::Failed(_)));
    assert!(matches!(service.records(), Err(AppError::NotReady)));
    assert!(matches!(service.dashboard(), Err(AppError::NotReady)));
}

#[tokio::test]
async fn batch_submission_applies_locally_only_after_ack() {
    let (store, mut service) = ready_service().await;
    let session = admin_session();
    let target = find(service.records().unwrap(), "VES-021").record_id();

    let outcome = service
        .submit_batch(
            &session,
            &[
                CellEdit {
                    record_id: target,
                    size: Size::P,
                    quantity: 5,
                },
                CellEdit {
                    record_id: target,
                    size: Size::M,
                    quantity: 3,
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(outcome.records_updated, 1);
    assert_eq!(outcome.transactions_recorded, 2);

    // local copy reconciled
    let updated = find(service.records().unwrap(), "VES-021");
    assert_eq!(updated.quantity(Size::P), 5);
    assert_eq!(updated.quantity(Size::M), 3);
    assert_eq!(updated.total(), 8);

    // remote truth matches
    assert_eq!(store.transaction_count(), 2);
    let remote = store.load_records().await.unwrap();
    assert_eq!(find(&remote, "VES-021").total(), 8);

    // ledger window holds the new movements, newest first
    let transactions = service.transactions().unwrap();
    assert_eq!(transactions.len(), 2);
    assert!(transactions.iter().all(|t| t.record_id == target));
}

#[tokio::test]
async fn zero_diff_batch_is_a_noop() {
    let (store, mut service) = ready_service().await;
    let session = admin_session();
    let target = find(service.records().unwrap(), "VES-021").record_id();

    let outcome = service
        .submit_batch(
            &session,
            &[
                CellEdit {
                    record_id: target,
                    size: Size::P,
                    quantity: 2,
                },
                CellEdit {
                    record_id: target,
                    size: Size::GG,
                    quantity: 0,
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(outcome, Default::default());
    assert_eq!(store.transaction_count(), 0);
}

#[tokio::test]
async fn unknown_record_edits_are_dropped_without_error() {
    let (store, mut service) = ready_service().await;
    let session = admin_session();

    let outcome = service
        .submit_batch(
            &session,
            &[CellEdit {
                record_id: RecordId::new(),
                size: Size::P,
                quantity: 10,
            }],
        )
        .await
        .unwrap();

    assert_eq!(outcome, Default::default());
    assert_eq!(store.transaction_count(), 0);
}

#[tokio::test]
async fn write_failure_mid_batch_aborts_and_rereads() {
    let (store, mut service) = ready_service().await;
    let session = admin_session();
    let records = service.records().unwrap();
    let first = find(records, "VES-021").record_id();
    let second = find(records, "BLU-007").record_id();

    // first aggregate update succeeds, the second write fails
    store.fail_write_after(1, "backend offline");

    let err = service
        .submit_batch(
            &session,
            &[
                CellEdit {
                    record_id: first,
                    size: Size::P,
                    quantity: 9,
                },
                CellEdit {
                    record_id: second,
                    size: Size::G1,
                    quantity: 0,
                },
            ],
        )
        .await
        .unwrap_err();
    assert!(err.is_remote());

    // no transaction reached the ledger, and the service re-read the
    // partially-applied remote truth instead of trusting its optimistic copy
    assert_eq!(store.transaction_count(), 0);
    assert_eq!(*service.phase(), LoadPhase::Ready);
    let records = service.records().unwrap();
    assert_eq!(find(records, "VES-021").quantity(Size::P), 9);
    assert_eq!(find(records, "BLU-007").quantity(Size::G1), 4);

    let remote = store.load_records().await.unwrap();
    assert_eq!(find(&remote, "VES-021").quantity(Size::P), 9);
    assert_eq!(find(&remote, "BLU-007").quantity(Size::G1), 4);
}

#[tokio::test]
async fn insufficient_stock_is_rejected_before_any_write() {
    let (store, mut service) = ready_service().await;
    let session = admin_session();
    let target = find(service.records().unwrap(), "BLU-007").record_id();

    let err = service
        .adjust_stock(&session, target, Size::G1, Direction::Out, 5, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Domain(DomainError::InsufficientStock {
            available: 4,
            requested: 5
        })
    ));
    assert_eq!(store.transaction_count(), 0);
    assert_eq!(
        find(&store.load_records().await.unwrap(), "BLU-007").quantity(Size::G1),
        4
    );
}

#[tokio::test]
async fn outbound_adjustment_attributes_the_customer() {
    let (store, mut service) = ready_service().await;
    let session = admin_session();
    let target = find(service.records().unwrap(), "BLU-007").record_id();
    let customer_id = service.customers().unwrap()[0].customer_id();

    service
        .adjust_stock(&session, target, Size::G1, Direction::Out, 2, Some(customer_id))
        .await
        .unwrap();

    let transactions = service.transactions().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].direction, Direction::Out);
    assert_eq!(transactions[0].customer_name.as_deref(), Some("Maria Silva"));

    let remote = store.load_recent_transactions(10).await.unwrap();
    assert_eq!(remote[0].customer_id, Some(customer_id));
    assert_eq!(
        find(&store.load_records().await.unwrap(), "BLU-007").quantity(Size::G1),
        2
    );
}

#[tokio::test]
async fn visitor_sessions_cannot_mutate() {
    let (store, mut service) = ready_service().await;
    let visitor = Session::visitor();
    let target = find(service.records().unwrap(), "VES-021").record_id();

    let err = service
        .submit_batch(
            &visitor,
            &[CellEdit {
                record_id: target,
                size: Size::P,
                quantity: 9,
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(DomainError::Unauthorized)));

    let err = service
        .adjust_stock(&visitor, target, Size::P, Direction::In, 1, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(DomainError::Unauthorized)));
    assert_eq!(store.transaction_count(), 0);
}

#[tokio::test]
async fn adding_records_seeds_the_ledger_with_inbound_movements() {
    let (store, mut service) = ready_service().await;
    let session = admin_session();

    let new_record = record("SAI-003", "Cru", &[(Size::P, 2), (Size::M, 0), (Size::G2, 1)]);
    service
        .add_records(&session, vec![new_record])
        .await
        .unwrap();

    // one inbound transaction per nonzero cell
    assert_eq!(store.transaction_count(), 2);
    assert_eq!(service.records().unwrap().len(), 3);
    let transactions = service.transactions().unwrap();
    assert!(transactions
        .iter()
        .all(|t| t.direction == Direction::In && t.product_name == "SAI-003 - Cru"));
}

#[tokio::test]
async fn record_detail_edits_reach_the_store_and_local_copy() {
    let (store, mut service) = ready_service().await;
    let session = admin_session();
    let target = find(service.records().unwrap(), "VES-021").record_id();

    service
        .update_record_details(&session, target, "VES-022", "Vestido Longo - Preto", Some(17_900))
        .await
        .unwrap();

    let updated = find(service.records().unwrap(), "VES-022");
    assert_eq!(updated.name(), "Vestido Longo - Preto");
    assert_eq!(updated.price_cents(), Some(17_900));

    let remote = store.load_records().await.unwrap();
    assert_eq!(find(&remote, "VES-022").price_cents(), Some(17_900));
}

#[tokio::test]
async fn rename_color_updates_every_member_of_the_block() {
    let (store, mut service) = ready_service().await;
    let session = admin_session();
    let ids: Vec<RecordId> = service
        .records()
        .unwrap()
        .iter()
        .filter(|r| r.color() == "Preto")
        .map(|r| r.record_id())
        .collect();

    service
        .rename_color(&session, &ids, "Grafite", Some("#333333".to_string()))
        .await
        .unwrap();

    let updated = find(service.records().unwrap(), "VES-021");
    assert_eq!(updated.color(), "Grafite");
    assert_eq!(updated.name(), "VES-021 - Grafite");

    let remote = store.load_records().await.unwrap();
    assert_eq!(find(&remote, "VES-021").color(), "Grafite");
}

#[tokio::test]
async fn customer_lifecycle_reconciles_after_ack() {
    let (store, mut service) = ready_service().await;
    let session = admin_session();

    let ana = Customer::new(CustomerId::new(), "Ana Costa", "", None).unwrap();
    let ana_id = ana.customer_id();
    service.add_customer(&session, ana).await.unwrap();
    assert_eq!(service.customers().unwrap().len(), 2);
    assert_eq!(store.load_customers().await.unwrap().len(), 2);

    service.delete_customer(&session, ana_id).await.unwrap();
    assert_eq!(service.customers().unwrap().len(), 1);
    assert_eq!(store.load_customers().await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_record_removes_it_from_catalog_views() {
    let (store, mut service) = ready_service().await;
    let session = admin_session();
    let target = find(service.records().unwrap(), "BLU-007").record_id();

    service.delete_record(&session, target).await.unwrap();
    assert_eq!(service.records().unwrap().len(), 1);
    assert_eq!(store.load_records().await.unwrap().len(), 1);

    let groups = service.image_groups().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].records.len(), 1);
    assert_eq!(groups[0].records[0].reference(), "VES-021");
}

#[tokio::test]
async fn summaries_reflect_the_loaded_state() {
    let (_store, mut service) = ready_service().await;
    let session = admin_session();
    let target = find(service.records().unwrap(), "BLU-007").record_id();

    service
        .adjust_stock(&session, target, Size::G1, Direction::Out, 1, None)
        .await
        .unwrap();

    let dashboard = service.dashboard().unwrap();
    // VES-021 has 2 units, BLU-007 now has 3
    assert_eq!(dashboard.total_units, 5);
    assert_eq!(dashboard.record_count, 2);
    assert_eq!(dashboard.low_stock_count, 2);

    let report = service.report().unwrap();
    assert_eq!(report.total_units, 5);
    // both records priced at 100.00
    assert_eq!(report.stock_value_cents, 50_000);
    assert_eq!(report.outflow_value_cents, 10_000);
    assert_eq!(report.out_of_stock_count, 0);
}
