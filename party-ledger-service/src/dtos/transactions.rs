use super::parties::PartyResponse;
use super::validate_positive_amount;
use crate::ledger::dates::parse_loose_date;
use crate::models::{
    LedgerTransaction, LinkedRef, NewTransaction, TransactionType, TransactionUpdate,
};
use crate::services::TransactionOutcome;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordTransactionRequest {
    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub linked: Option<LinkedRef>,
    pub status: Option<String>,
}

impl From<RecordTransactionRequest> for NewTransaction {
    fn from(req: RecordTransactionRequest) -> Self {
        Self {
            amount: req.amount,
            txn_type: req.txn_type,
            description: req.description,
            date: req.date,
            linked: req.linked,
            status: req.status,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Option<Decimal>,
    #[serde(rename = "type")]
    pub txn_type: Option<TransactionType>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

impl From<UpdateTransactionRequest> for TransactionUpdate {
    fn from(req: UpdateTransactionRequest) -> Self {
        Self {
            amount: req.amount,
            txn_type: req.txn_type,
            description: req.description,
            date: req.date,
            status: req.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: String,
    pub party_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
    pub description: Option<String>,
    pub date: Option<String>,
    pub linked: Option<LinkedRef>,
    pub status: Option<String>,
    pub is_deleted: bool,
}

impl From<LedgerTransaction> for TransactionResponse {
    fn from(txn: LedgerTransaction) -> Self {
        Self {
            date: txn
                .date
                .as_ref()
                .and_then(parse_loose_date)
                .map(|d| d.to_rfc3339()),
            linked: txn.linked_ref(),
            id: txn.id,
            party_id: txn.party_id,
            amount: txn.amount,
            txn_type: txn.txn_type,
            description: txn.description,
            status: txn.status,
            is_deleted: txn.is_deleted,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionOutcomeResponse {
    pub transaction: TransactionResponse,
    pub party: PartyResponse,
}

impl From<TransactionOutcome> for TransactionOutcomeResponse {
    fn from(outcome: TransactionOutcome) -> Self {
        Self {
            transaction: outcome.transaction.into(),
            party: outcome.party.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_must_be_positive() {
        let req: RecordTransactionRequest =
            serde_json::from_str(r#"{"amount": 0, "type": "You Gave"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: RecordTransactionRequest = serde_json::from_str(
            r#"{"amount": 250.5, "type": "You Got", "linked": {"source": "newsale", "refId": "X"}}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.amount, dec!(250.5));
        assert_eq!(req.linked.unwrap().ref_id, "X");
    }

    #[test]
    fn test_partial_update_validates_only_present_amount() {
        let req: UpdateTransactionRequest =
            serde_json::from_str(r#"{"description": "corrected"}"#).unwrap();
        assert!(req.validate().is_ok());

        let req: UpdateTransactionRequest = serde_json::from_str(r#"{"amount": -5}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
