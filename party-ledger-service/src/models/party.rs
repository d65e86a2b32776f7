//! Party (customer/supplier) model and the opening-balance sign convention.

use chrono::Utc;
use mongodb::bson;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of an opening balance as entered by the user.
///
/// Positive balances mean the party owes the business, negative balances
/// mean the business owes the party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceType {
    #[serde(rename = "To Collect", alias = "To Receive")]
    ToCollect,
    #[serde(rename = "To Pay")]
    ToPay,
}

impl BalanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToCollect => "To Collect",
            Self::ToPay => "To Pay",
        }
    }

    /// Turn an entered amount into the signed stored value.
    pub fn normalize(self, amount: Decimal) -> Decimal {
        match self {
            Self::ToCollect => amount.abs(),
            Self::ToPay => -amount.abs(),
        }
    }

    /// Recover the entry direction from a signed stored value.
    pub fn from_signed(value: Decimal) -> Self {
        if value < Decimal::ZERO {
            Self::ToPay
        } else {
            Self::ToCollect
        }
    }
}

impl std::fmt::Display for BalanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer or supplier with a cached running balance.
///
/// `balance == opening_balance + Σ signed transaction deltas` after every
/// mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "businessId")]
    pub tenant_id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub opening_balance: Decimal,
    #[serde(default)]
    pub opening_balance_type: Option<BalanceType>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub deleted_at: Option<bson::DateTime>,
    #[serde(default)]
    pub created_at: Option<bson::DateTime>,
    #[serde(default)]
    pub updated_at: Option<bson::DateTime>,
}

impl Party {
    pub fn new(
        tenant_id: String,
        name: String,
        phone: Option<String>,
        opening_amount: Decimal,
        balance_type: BalanceType,
    ) -> Self {
        let now = bson::DateTime::from_chrono(Utc::now());
        let opening_balance = balance_type.normalize(opening_amount);
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            name,
            phone,
            opening_balance,
            opening_balance_type: Some(balance_type),
            balance: opening_balance,
            is_deleted: false,
            deleted_at: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Entry direction of the opening balance, derived from the sign when the
    /// stored type is missing.
    pub fn balance_type(&self) -> BalanceType {
        self.opening_balance_type
            .unwrap_or_else(|| BalanceType::from_signed(self.opening_balance))
    }

    /// Human-facing label for the current balance.
    pub fn balance_label(&self) -> &'static str {
        if self.balance > Decimal::ZERO {
            "To Receive"
        } else if self.balance < Decimal::ZERO {
            "To Pay"
        } else {
            "Settled"
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Some(bson::DateTime::from_chrono(Utc::now()));
    }

    pub fn mark_deleted(&mut self) {
        let now = bson::DateTime::from_chrono(Utc::now());
        self.is_deleted = true;
        self.deleted_at = Some(now);
        self.updated_at = Some(now);
    }
}

/// Input for creating a party.
#[derive(Debug, Clone)]
pub struct NewParty {
    pub name: String,
    pub phone: Option<String>,
    pub opening_balance: Decimal,
    pub balance_type: BalanceType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_opening_balance_sign_convention() {
        assert_eq!(BalanceType::ToCollect.normalize(dec!(500)), dec!(500));
        assert_eq!(BalanceType::ToPay.normalize(dec!(500)), dec!(-500));
        // Entered sign is ignored; the type decides.
        assert_eq!(BalanceType::ToCollect.normalize(dec!(-75.5)), dec!(75.5));
    }

    #[test]
    fn test_new_party_starts_at_opening_balance() {
        let party = Party::new(
            "biz".to_string(),
            "Acme Traders".to_string(),
            None,
            dec!(250),
            BalanceType::ToPay,
        );
        assert_eq!(party.opening_balance, dec!(-250));
        assert_eq!(party.balance, dec!(-250));
        assert_eq!(party.balance_label(), "To Pay");
        assert_eq!(party.balance_type(), BalanceType::ToPay);
    }

    #[test]
    fn test_balance_type_falls_back_to_sign() {
        let mut party = Party::new(
            "biz".to_string(),
            "Legacy".to_string(),
            None,
            dec!(10),
            BalanceType::ToPay,
        );
        party.opening_balance_type = None;
        assert_eq!(party.balance_type(), BalanceType::ToPay);
    }

    #[test]
    fn test_balance_type_serde_labels() {
        let json = serde_json::to_string(&BalanceType::ToCollect).unwrap();
        assert_eq!(json, "\"To Collect\"");
        let parsed: BalanceType = serde_json::from_str("\"To Receive\"").unwrap();
        assert_eq!(parsed, BalanceType::ToCollect);
    }
}
