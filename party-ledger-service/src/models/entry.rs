//! Canonical ledger entry produced on every ledger read.

use super::documents::DocumentKind;
use super::party::Party;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Human-facing category of a ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "You Gave")]
    YouGave,
    #[serde(rename = "You Got")]
    YouGot,
    #[serde(rename = "Sales Invoice")]
    SalesInvoice,
    #[serde(rename = "Purchase Invoice")]
    PurchaseInvoice,
    #[serde(rename = "Sales Return")]
    SalesReturn,
    #[serde(rename = "Purchase Return")]
    PurchaseReturn,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::YouGave => "You Gave",
            Self::YouGot => "You Got",
            Self::SalesInvoice => "Sales Invoice",
            Self::PurchaseInvoice => "Purchase Invoice",
            Self::SalesReturn => "Sales Return",
            Self::PurchaseReturn => "Purchase Return",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Collection a ledger row was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Transaction,
    Sale,
    Purchase,
    NewSale,
    NewPurchase,
    SaleReturn,
    PurchaseReturn,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transaction => "transaction",
            Self::Sale => "sale",
            Self::Purchase => "purchase",
            Self::NewSale => "newsale",
            Self::NewPurchase => "newpurchase",
            Self::SaleReturn => "salereturn",
            Self::PurchaseReturn => "purchasereturn",
        }
    }
}

impl From<DocumentKind> for SourceKind {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Sale => Self::Sale,
            DocumentKind::Purchase => Self::Purchase,
            DocumentKind::NewSale => Self::NewSale,
            DocumentKind::NewPurchase => Self::NewPurchase,
            DocumentKind::SaleReturn => Self::SaleReturn,
            DocumentKind::PurchaseReturn => Self::PurchaseReturn,
        }
    }
}

/// Pointer to the invoice/return document behind a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocRef {
    pub kind: DocumentKind,
    pub id: String,
}

/// One row of a party's unified history. Derived on read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: Category,
    pub reference: String,
    /// Latest of all date-like fields on the origin record, epoch if none.
    pub date: DateTime<Utc>,
    pub status: String,
    pub source_kind: SourceKind,
    pub source_id: String,
    pub doc_ref: Option<DocRef>,
}

impl LedgerEntry {
    pub fn entry_id(kind: SourceKind, source_id: &str) -> String {
        format!("{}:{}", kind.as_str(), source_id)
    }
}

/// Column descriptor returned alongside the ledger rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
}

/// Columns of the ledger view, in display order.
pub const LEDGER_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "date",
        label: "Date",
    },
    FieldDescriptor {
        key: "category",
        label: "Type",
    },
    FieldDescriptor {
        key: "reference",
        label: "Reference",
    },
    FieldDescriptor {
        key: "amount",
        label: "Amount",
    },
    FieldDescriptor {
        key: "status",
        label: "Status",
    },
];

/// Result of a ledger read.
#[derive(Debug, Clone)]
pub struct Ledger {
    pub party: Party,
    pub entries: Vec<LedgerEntry>,
    pub fields: &'static [FieldDescriptor],
}
