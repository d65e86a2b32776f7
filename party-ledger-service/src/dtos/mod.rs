pub mod ledger;
pub mod parties;
pub mod transactions;

pub use ledger::{LedgerEntryResponse, LedgerResponse};
pub use parties::{CreatePartyRequest, PartyResponse, UpdateOpeningBalanceRequest};
pub use transactions::{
    RecordTransactionRequest, TransactionOutcomeResponse, TransactionResponse,
    UpdateTransactionRequest,
};

use rust_decimal::Decimal;
use validator::ValidationError;

pub(crate) fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        let mut err = ValidationError::new("positive_amount");
        err.message = Some("Amount must be greater than zero".into());
        return Err(err);
    }
    Ok(())
}
