use crate::models::{BalanceType, NewParty, Party};
use mongodb::bson;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn rfc3339(dt: Option<bson::DateTime>) -> Option<String> {
    dt.map(|d| d.to_chrono().to_rfc3339())
}

fn default_balance_type() -> BalanceType {
    BalanceType::ToCollect
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartyRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    pub phone: Option<String>,
    /// Entered amount; its sign is taken from `balance_type`.
    #[serde(default)]
    pub opening_balance: Decimal,
    #[serde(default = "default_balance_type")]
    pub balance_type: BalanceType,
}

impl From<CreatePartyRequest> for NewParty {
    fn from(req: CreatePartyRequest) -> Self {
        Self {
            name: req.name,
            phone: req.phone,
            opening_balance: req.opening_balance,
            balance_type: req.balance_type,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOpeningBalanceRequest {
    pub opening_balance: Decimal,
    pub balance_type: Option<BalanceType>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyResponse {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub opening_balance: Decimal,
    pub opening_balance_type: BalanceType,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub balance_label: String,
    pub is_deleted: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Party> for PartyResponse {
    fn from(party: Party) -> Self {
        Self {
            opening_balance_type: party.balance_type(),
            balance_label: party.balance_label().to_string(),
            id: party.id,
            name: party.name,
            phone: party.phone,
            opening_balance: party.opening_balance,
            balance: party.balance,
            is_deleted: party.is_deleted,
            created_at: rfc3339(party.created_at),
            updated_at: rfc3339(party.updated_at),
        }
    }
}
