use anyhow::Result;
use chrono::Utc;

use atelier_app::{login, AdminCredentials, InventoryService};
use atelier_catalog::StockRecord;
use atelier_core::{CustomerId, RecordId, Size, SizeGrid};
use atelier_customers::Customer;
use atelier_inventory::CellEdit;
use atelier_ledger::Direction;
use atelier_store::{CatalogStore, InMemoryStore};

/// Demo run against the in-memory store: seed a small catalog, submit a grid
/// edit, take one attributed sale, and log the resulting summaries.
#[tokio::main]
async fn main() -> Result<()> {
    atelier_app::telemetry::init();

    let store = InMemoryStore::new();
    seed(&store).await?;

    let mut service = InventoryService::new(store);
    service.refresh().await?;

    let credentials = AdminCredentials::from_env();
    let session = match login(&credentials, "admin", "admin123") {
        Ok(session) => session,
        Err(_) => {
            tracing::warn!("dev credentials rejected (custom env credentials set); continuing read-only");
            let summary = service.dashboard()?;
            tracing::info!(?summary, "dashboard");
            return Ok(());
        }
    };

    let records = service.records()?.to_vec();
    let dress = &records[0];

    // Retype two cells of the first record's grid.
    let edits = vec![
        CellEdit {
            record_id: dress.record_id(),
            size: Size::P,
            quantity: dress.quantity(Size::P) + 3,
        },
        CellEdit {
            record_id: dress.record_id(),
            size: Size::M,
            quantity: 1,
        },
    ];
    let outcome = service.submit_batch(&session, &edits).await?;
    tracing::info!(
        records_updated = outcome.records_updated,
        transactions_recorded = outcome.transactions_recorded,
        "grid edit applied"
    );

    // One attributed sale through the validated interactive path.
    let customer_id = service.customers()?[0].customer_id();
    service
        .adjust_stock(
            &session,
            dress.record_id(),
            Size::P,
            Direction::Out,
            1,
            Some(customer_id),
        )
        .await?;

    let dashboard = service.dashboard()?;
    tracing::info!(?dashboard, "dashboard");
    let report = service.report()?;
    tracing::info!(
        stock_value_cents = report.stock_value_cents,
        outflow_value_cents = report.outflow_value_cents,
        out_of_stock = report.out_of_stock_count,
        "report"
    );

    Ok(())
}

async fn seed(store: &InMemoryStore) -> Result<()> {
    let dress_grid: SizeGrid = [(Size::P, 2), (Size::M, 4), (Size::G, 1)].into_iter().collect();
    let dress = StockRecord::new(
        RecordId::new(),
        "VES-021",
        "Vestido Midi - Preto",
        "Preto",
        dress_grid,
    )?
    .with_color_hex("#111111")
    .with_image_ref("vestido-midi.jpg")
    .with_price_cents(15_900);

    let blouse = StockRecord::new(
        RecordId::new(),
        "BLU-007",
        "Blusa Canelada - Rosa",
        "Rosa",
        [(Size::G1, 3), (Size::G2, 2)].into_iter().collect(),
    )?
    .with_color_hex("#e8a0b4")
    .with_image_ref("blusa-canelada.jpg")
    .with_price_cents(8_900);

    let now = Utc::now();
    let mut seed_transactions = Vec::new();
    for record in [&dress, &blouse] {
        for (size, quantity) in record.stocks().iter() {
            if quantity > 0 {
                seed_transactions.push(atelier_ledger::StockTransaction::inbound(
                    record.record_id(),
                    record.name(),
                    size,
                    quantity,
                    now,
                )?);
            }
        }
    }

    store.insert_records(vec![dress, blouse]).await?;
    store.append_transactions(seed_transactions).await?;
    store
        .insert_customer(Customer::new(
            CustomerId::new(),
            "Maria Silva",
            "+55 11 98888-0000",
            Some("maria@example.com".to_string()),
        )?)
        .await?;

    Ok(())
}
