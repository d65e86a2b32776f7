pub mod health;
pub mod ledger;
pub mod parties;
pub mod transactions;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use ledger::{get_ledger, recompute_balance};
pub use parties::{create_party, delete_party, update_opening_balance};
pub use transactions::{delete_transaction, record_transaction, update_transaction};

use crate::services::LedgerError;
use crate::services::metrics::record_error;
use service_core::error::AppError;

/// Count a failed ledger operation and turn it into an HTTP error.
pub(crate) fn ledger_failure(err: LedgerError) -> AppError {
    record_error(err.error_type());
    match &err {
        LedgerError::Store(e) => tracing::error!(error = %e, "Ledger store failure"),
        other => tracing::warn!(error = %other, "Ledger request rejected"),
    }
    err.into()
}
