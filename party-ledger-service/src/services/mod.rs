pub mod database;
pub mod error;
pub mod metrics;
pub mod reconciler;
pub mod store;

pub use database::MongoDb;
pub use error::LedgerError;
pub use metrics::{get_metrics, init_metrics};
pub use reconciler::{LedgerService, TransactionOutcome};
pub use store::LedgerStore;
