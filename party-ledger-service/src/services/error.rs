use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Party not found: {0}")]
    PartyNotFound(String),

    #[error("Party {0} belongs to another business")]
    TenantMismatch(String),

    #[error("Party {0} has been deleted")]
    PartyDeleted(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Ledger read for party {0} timed out")]
    ReadTimeout(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Store error: {0}")]
    Store(#[from] AppError),
}

impl LedgerError {
    /// Label used on the `ledger_errors_total` counter.
    pub fn error_type(&self) -> &'static str {
        match self {
            LedgerError::PartyNotFound(_) => "party_not_found",
            LedgerError::TenantMismatch(_) => "tenant_mismatch",
            LedgerError::PartyDeleted(_) => "party_deleted",
            LedgerError::TransactionNotFound(_) => "transaction_not_found",
            LedgerError::ReadTimeout(_) => "read_timeout",
            LedgerError::InvalidInput(_) => "invalid_input",
            LedgerError::Store(_) => "store_error",
        }
    }
}

impl From<mongodb::error::Error> for LedgerError {
    fn from(err: mongodb::error::Error) -> Self {
        LedgerError::Store(AppError::from(err))
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::PartyNotFound(id) => {
                AppError::NotFound(anyhow::anyhow!("Party not found: {}", id))
            }
            LedgerError::TenantMismatch(id) => AppError::Forbidden(anyhow::anyhow!(
                "Party {} does not belong to this business",
                id
            )),
            LedgerError::PartyDeleted(id) => {
                AppError::Gone(anyhow::anyhow!("Party {} has been deleted", id))
            }
            LedgerError::TransactionNotFound(id) => {
                AppError::NotFound(anyhow::anyhow!("Transaction not found: {}", id))
            }
            LedgerError::ReadTimeout(id) => {
                AppError::GatewayTimeout(format!("ledger for party {} could not be loaded", id))
            }
            LedgerError::InvalidInput(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            LedgerError::Store(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (LedgerError::PartyNotFound("p".into()), StatusCode::NOT_FOUND),
            (LedgerError::TenantMismatch("p".into()), StatusCode::FORBIDDEN),
            (LedgerError::PartyDeleted("p".into()), StatusCode::GONE),
            (LedgerError::TransactionNotFound("t".into()), StatusCode::NOT_FOUND),
            (LedgerError::ReadTimeout("p".into()), StatusCode::GATEWAY_TIMEOUT),
            (LedgerError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (
                LedgerError::Store(AppError::DatabaseError(anyhow::anyhow!("down"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }
}
