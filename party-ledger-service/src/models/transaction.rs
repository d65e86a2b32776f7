//! Manual ledger transactions ("You Gave" / "You Got").

use super::documents::DocumentKind;
use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a manual money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "You Gave")]
    YouGave,
    #[serde(rename = "You Got")]
    YouGot,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::YouGave => "You Gave",
            Self::YouGot => "You Got",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Back-reference from a transaction to the document that generated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedRef {
    pub source: String,
    pub ref_id: String,
}

impl LinkedRef {
    /// Parse the stored `linked` value. Anything that is not a document with
    /// a non-empty `source` and `refId` is treated as no link at all.
    pub fn from_bson(value: &Bson) -> Option<Self> {
        let doc = value.as_document()?;

        let source = doc.get_str("source").ok()?.trim();
        if source.is_empty() {
            return None;
        }

        let ref_id = match doc.get("refId").or_else(|| doc.get("ref_id"))? {
            Bson::String(s) => s.trim().to_string(),
            Bson::ObjectId(oid) => oid.to_hex(),
            _ => return None,
        };
        if ref_id.is_empty() {
            return None;
        }

        Some(Self {
            source: source.to_string(),
            ref_id,
        })
    }

    pub fn to_bson(&self) -> Bson {
        Bson::Document(bson::doc! {
            "source": &self.source,
            "refId": &self.ref_id,
        })
    }

    /// Settlement of an existing document rather than the document itself.
    pub fn is_payment(&self) -> bool {
        self.source.to_ascii_lowercase().ends_with("_payment")
    }

    pub fn document_kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_source_tag(&self.source)
    }
}

/// Manual or auto-generated money movement against a party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransaction {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "businessId")]
    pub tenant_id: String,
    pub party_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<Bson>,
    /// Kept raw; see [`LinkedRef::from_bson`].
    #[serde(default)]
    pub linked: Option<Bson>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub saved_at: Option<Bson>,
    #[serde(default)]
    pub created_at: Option<Bson>,
    #[serde(default)]
    pub updated_at: Option<Bson>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub deleted_at: Option<bson::DateTime>,
}

impl LedgerTransaction {
    pub fn new(tenant_id: String, party_id: String, input: NewTransaction) -> Self {
        let now = Bson::DateTime(bson::DateTime::from_chrono(Utc::now()));
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            party_id,
            amount: input.amount,
            txn_type: input.txn_type,
            description: input.description,
            date: Some(
                input
                    .date
                    .map(|d| Bson::DateTime(bson::DateTime::from_chrono(d)))
                    .unwrap_or_else(|| now.clone()),
            ),
            linked: input.linked.as_ref().map(LinkedRef::to_bson),
            status: input.status,
            saved_at: None,
            created_at: Some(now.clone()),
            updated_at: Some(now),
            is_deleted: false,
            deleted_at: None,
        }
    }

    pub fn linked_ref(&self) -> Option<LinkedRef> {
        self.linked.as_ref().and_then(LinkedRef::from_bson)
    }

    /// Apply an edit. Fields left `None` keep their value.
    pub fn apply(&mut self, update: TransactionUpdate) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(txn_type) = update.txn_type {
            self.txn_type = txn_type;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(date) = update.date {
            self.date = Some(Bson::DateTime(bson::DateTime::from_chrono(date)));
        }
        if let Some(status) = update.status {
            self.status = Some(status);
        }
        self.updated_at = Some(Bson::DateTime(bson::DateTime::from_chrono(Utc::now())));
    }

    pub fn mark_deleted(&mut self) {
        let now = bson::DateTime::from_chrono(Utc::now());
        self.is_deleted = true;
        self.deleted_at = Some(now);
        self.updated_at = Some(Bson::DateTime(now));
    }
}

/// Input for recording a transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub txn_type: TransactionType,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub linked: Option<LinkedRef>,
    pub status: Option<String>,
}

/// Partial edit of a transaction.
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub amount: Option<Decimal>,
    pub txn_type: Option<TransactionType>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub status: Option<String>,
}
