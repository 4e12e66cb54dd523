//! Application layer.
//!
//! Ties the pure domain crates to the store port: explicit session handling,
//! the orchestration service (load/refresh, batch submission, single
//! adjustments, product and customer lifecycle), and the dashboard/report
//! summaries.

pub mod dashboard;
pub mod error;
pub mod reports;
pub mod service;
pub mod session;
pub mod telemetry;

pub use dashboard::{DashboardSummary, LOW_STOCK_THRESHOLD};
pub use error::AppError;
pub use reports::StockReport;
pub use service::{BatchOutcome, InventoryService, LoadPhase, RECENT_TRANSACTION_LIMIT};
pub use session::{login, AccessLevel, AdminCredentials, Session};
