//! Invoice and return documents read from the billing collections.
//!
//! Each collection has its own shape. Field names drifted between the legacy
//! and the newer invoice screens and old records may carry several variants at
//! once, so every variant is its own optional field and the accessors pick the
//! first one present.

use super::entry::Category;
use mongodb::bson::{self, Bson, Document};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// The six invoice/return collections merged into a party ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Sale,
    Purchase,
    NewSale,
    NewPurchase,
    SaleReturn,
    PurchaseReturn,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 6] = [
        Self::Sale,
        Self::Purchase,
        Self::NewSale,
        Self::NewPurchase,
        Self::SaleReturn,
        Self::PurchaseReturn,
    ];

    /// Tag used in `linked.source` and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Purchase => "purchase",
            Self::NewSale => "newsale",
            Self::NewPurchase => "newpurchase",
            Self::SaleReturn => "salereturn",
            Self::PurchaseReturn => "purchasereturn",
        }
    }

    pub fn collection(&self) -> &'static str {
        match self {
            Self::Sale => "sales",
            Self::Purchase => "purchases",
            Self::NewSale => "newsales",
            Self::NewPurchase => "newpurchases",
            Self::SaleReturn => "salereturns",
            Self::PurchaseReturn => "purchasereturns",
        }
    }

    /// Field each reader sorts on (newest first).
    pub fn primary_date_field(&self) -> &'static str {
        match self {
            Self::Sale | Self::NewSale => "invoiceDate",
            Self::Purchase | Self::NewPurchase => "billDate",
            Self::SaleReturn | Self::PurchaseReturn => "returnDate",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Sale | Self::NewSale => Category::SalesInvoice,
            Self::Purchase | Self::NewPurchase => Category::PurchaseInvoice,
            Self::SaleReturn => Category::SalesReturn,
            Self::PurchaseReturn => Category::PurchaseReturn,
        }
    }

    /// Resolve a `linked.source` tag.
    ///
    /// A trailing `_payment` marks a settlement of the document and is
    /// stripped before lookup. Case, `_`, `-` and a plural `s` are ignored.
    pub fn from_source_tag(tag: &str) -> Option<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        let base = lowered.strip_suffix("_payment").unwrap_or(&lowered);
        let compact: String = base
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect();
        let singular = compact.strip_suffix('s').unwrap_or(&compact);

        match singular {
            "sale" => Some(Self::Sale),
            "purchase" => Some(Self::Purchase),
            "newsale" => Some(Self::NewSale),
            "newpurchase" => Some(Self::NewPurchase),
            "salereturn" | "salesreturn" => Some(Self::SaleReturn),
            "purchasereturn" => Some(Self::PurchaseReturn),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `_id` as stored by the invoicing screens: a string or an ObjectId, kept as
/// its hex form.
fn record_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Bson::deserialize(deserializer)? {
        Bson::String(id) => Ok(id),
        Bson::ObjectId(oid) => Ok(oid.to_hex()),
        other => Err(D::Error::custom(format!(
            "unsupported _id type {:?}",
            other.element_type()
        ))),
    }
}

/// Snapshot of the document a newer record was converted from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalDocument {
    #[serde(default)]
    pub created_at: Option<Bson>,
}

/// Legacy sale invoice (`sales`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInvoice {
    #[serde(rename = "_id", deserialize_with = "record_id")]
    pub id: String,
    #[serde(rename = "businessId")]
    pub tenant_id: String,
    pub party_id: String,
    #[serde(default)]
    pub invoice_no: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub invoice_date: Option<Bson>,
    #[serde(default)]
    pub sale_date: Option<Bson>,
    #[serde(default)]
    pub date: Option<Bson>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub invoice_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub balance_amount: Option<Decimal>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub saved_at: Option<Bson>,
    #[serde(default)]
    pub created_at: Option<Bson>,
    #[serde(default)]
    pub updated_at: Option<Bson>,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Legacy purchase bill (`purchases`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseInvoice {
    #[serde(rename = "_id", deserialize_with = "record_id")]
    pub id: String,
    #[serde(rename = "businessId")]
    pub tenant_id: String,
    pub party_id: String,
    #[serde(default)]
    pub bill_no: Option<String>,
    #[serde(default)]
    pub invoice_no: Option<String>,
    #[serde(default)]
    pub purchase_no: Option<String>,
    #[serde(default)]
    pub bill_date: Option<Bson>,
    #[serde(default)]
    pub invoice_date: Option<Bson>,
    #[serde(default)]
    pub purchase_date: Option<Bson>,
    #[serde(default)]
    pub date: Option<Bson>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub invoice_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub balance_amount: Option<Decimal>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub saved_at: Option<Bson>,
    #[serde(default)]
    pub created_at: Option<Bson>,
    #[serde(default)]
    pub updated_at: Option<Bson>,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Sale invoice from the newer invoicing screens (`newsales`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSaleInvoice {
    #[serde(rename = "_id", deserialize_with = "record_id")]
    pub id: String,
    #[serde(rename = "businessId")]
    pub tenant_id: String,
    pub party_id: String,
    #[serde(default)]
    pub invoice_no: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub invoice_date: Option<Bson>,
    #[serde(default)]
    pub date: Option<Bson>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub invoice_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub balance_amount: Option<Decimal>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub original_document: Option<OriginalDocument>,
    #[serde(default)]
    pub saved_at: Option<Bson>,
    #[serde(default)]
    pub created_at: Option<Bson>,
    #[serde(default)]
    pub updated_at: Option<Bson>,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Purchase bill from the newer invoicing screens (`newpurchases`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchaseInvoice {
    #[serde(rename = "_id", deserialize_with = "record_id")]
    pub id: String,
    #[serde(rename = "businessId")]
    pub tenant_id: String,
    pub party_id: String,
    #[serde(default)]
    pub bill_no: Option<String>,
    #[serde(default)]
    pub invoice_no: Option<String>,
    #[serde(default)]
    pub bill_date: Option<Bson>,
    #[serde(default)]
    pub invoice_date: Option<Bson>,
    #[serde(default)]
    pub date: Option<Bson>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub invoice_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub balance_amount: Option<Decimal>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub original_document: Option<OriginalDocument>,
    #[serde(default)]
    pub saved_at: Option<Bson>,
    #[serde(default)]
    pub created_at: Option<Bson>,
    #[serde(default)]
    pub updated_at: Option<Bson>,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Credit note issued to a customer (`salereturns`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleReturn {
    #[serde(rename = "_id", deserialize_with = "record_id")]
    pub id: String,
    #[serde(rename = "businessId")]
    pub tenant_id: String,
    pub party_id: String,
    #[serde(default)]
    pub return_no: Option<String>,
    #[serde(default)]
    pub credit_note_no: Option<String>,
    #[serde(default)]
    pub return_date: Option<Bson>,
    #[serde(default)]
    pub date: Option<Bson>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount_refunded: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub balance_amount: Option<Decimal>,
    #[serde(default)]
    pub refund_status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub original_document: Option<OriginalDocument>,
    #[serde(default)]
    pub saved_at: Option<Bson>,
    #[serde(default)]
    pub created_at: Option<Bson>,
    #[serde(default)]
    pub updated_at: Option<Bson>,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Debit note raised against a supplier (`purchasereturns`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReturn {
    #[serde(rename = "_id", deserialize_with = "record_id")]
    pub id: String,
    #[serde(rename = "businessId")]
    pub tenant_id: String,
    pub party_id: String,
    #[serde(default)]
    pub return_no: Option<String>,
    #[serde(default)]
    pub debit_note_no: Option<String>,
    #[serde(default)]
    pub return_date: Option<Bson>,
    #[serde(default)]
    pub date: Option<Bson>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount_paid: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub balance_amount: Option<Decimal>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub original_document: Option<OriginalDocument>,
    #[serde(default)]
    pub saved_at: Option<Bson>,
    #[serde(default)]
    pub created_at: Option<Bson>,
    #[serde(default)]
    pub updated_at: Option<Bson>,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Any invoice/return document, tagged by the collection it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceDocument {
    Sale(SaleInvoice),
    Purchase(PurchaseInvoice),
    NewSale(NewSaleInvoice),
    NewPurchase(NewPurchaseInvoice),
    SaleReturn(SaleReturn),
    PurchaseReturn(PurchaseReturn),
}

fn first_amount(candidates: [Option<Decimal>; 3]) -> Decimal {
    candidates.into_iter().flatten().next().unwrap_or(Decimal::ZERO)
}

/// First non-blank variant of a drifted text field.
fn first_text<'a, const N: usize>(candidates: [&'a Option<String>; N]) -> Option<&'a str> {
    candidates
        .into_iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.trim().is_empty())
}

/// First present variant of a drifted date field.
fn first_date<'a, const N: usize>(candidates: [&'a Option<Bson>; N]) -> Option<&'a Bson> {
    candidates.into_iter().find_map(|c| c.as_ref())
}

fn original_created_at(original: &Option<OriginalDocument>) -> Option<&Bson> {
    original.as_ref().and_then(|o| o.created_at.as_ref())
}

impl SourceDocument {
    /// Decode a raw record read from `kind`'s collection.
    pub fn from_document(kind: DocumentKind, raw: Document) -> Result<Self, bson::de::Error> {
        Ok(match kind {
            DocumentKind::Sale => Self::Sale(bson::from_document(raw)?),
            DocumentKind::Purchase => Self::Purchase(bson::from_document(raw)?),
            DocumentKind::NewSale => Self::NewSale(bson::from_document(raw)?),
            DocumentKind::NewPurchase => Self::NewPurchase(bson::from_document(raw)?),
            DocumentKind::SaleReturn => Self::SaleReturn(bson::from_document(raw)?),
            DocumentKind::PurchaseReturn => Self::PurchaseReturn(bson::from_document(raw)?),
        })
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Sale(_) => DocumentKind::Sale,
            Self::Purchase(_) => DocumentKind::Purchase,
            Self::NewSale(_) => DocumentKind::NewSale,
            Self::NewPurchase(_) => DocumentKind::NewPurchase,
            Self::SaleReturn(_) => DocumentKind::SaleReturn,
            Self::PurchaseReturn(_) => DocumentKind::PurchaseReturn,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Sale(d) => &d.id,
            Self::Purchase(d) => &d.id,
            Self::NewSale(d) => &d.id,
            Self::NewPurchase(d) => &d.id,
            Self::SaleReturn(d) => &d.id,
            Self::PurchaseReturn(d) => &d.id,
        }
    }

    pub fn tenant_id(&self) -> &str {
        match self {
            Self::Sale(d) => &d.tenant_id,
            Self::Purchase(d) => &d.tenant_id,
            Self::NewSale(d) => &d.tenant_id,
            Self::NewPurchase(d) => &d.tenant_id,
            Self::SaleReturn(d) => &d.tenant_id,
            Self::PurchaseReturn(d) => &d.tenant_id,
        }
    }

    pub fn party_id(&self) -> &str {
        match self {
            Self::Sale(d) => &d.party_id,
            Self::Purchase(d) => &d.party_id,
            Self::NewSale(d) => &d.party_id,
            Self::NewPurchase(d) => &d.party_id,
            Self::SaleReturn(d) => &d.party_id,
            Self::PurchaseReturn(d) => &d.party_id,
        }
    }

    pub fn is_deleted(&self) -> bool {
        match self {
            Self::Sale(d) => d.is_deleted,
            Self::Purchase(d) => d.is_deleted,
            Self::NewSale(d) => d.is_deleted,
            Self::NewPurchase(d) => d.is_deleted,
            Self::SaleReturn(d) => d.is_deleted,
            Self::PurchaseReturn(d) => d.is_deleted,
        }
    }

    /// Document value: invoice amount, then total, then outstanding balance.
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Sale(d) => first_amount([d.invoice_amount, d.total_amount, d.balance_amount]),
            Self::Purchase(d) => {
                first_amount([d.invoice_amount, d.total_amount, d.balance_amount])
            }
            Self::NewSale(d) => first_amount([d.invoice_amount, d.total_amount, d.balance_amount]),
            Self::NewPurchase(d) => {
                first_amount([d.invoice_amount, d.total_amount, d.balance_amount])
            }
            Self::SaleReturn(d) => first_amount([None, d.total_amount, d.balance_amount]),
            Self::PurchaseReturn(d) => first_amount([None, d.total_amount, d.balance_amount]),
        }
    }

    /// Invoice, bill or return number as entered.
    pub fn number(&self) -> Option<&str> {
        match self {
            Self::Sale(d) => first_text([&d.invoice_no, &d.invoice_number]),
            Self::Purchase(d) => first_text([&d.bill_no, &d.invoice_no, &d.purchase_no]),
            Self::NewSale(d) => first_text([&d.invoice_no, &d.invoice_number]),
            Self::NewPurchase(d) => first_text([&d.bill_no, &d.invoice_no]),
            Self::SaleReturn(d) => first_text([&d.return_no, &d.credit_note_no]),
            Self::PurchaseReturn(d) => first_text([&d.return_no, &d.debit_note_no]),
        }
    }

    pub fn notes(&self) -> Option<&str> {
        match self {
            Self::Sale(d) => d.notes.as_deref(),
            Self::Purchase(d) => d.notes.as_deref(),
            Self::NewSale(d) => d.notes.as_deref(),
            Self::NewPurchase(d) => d.notes.as_deref(),
            Self::SaleReturn(d) => d.notes.as_deref(),
            Self::PurchaseReturn(d) => d.notes.as_deref(),
        }
    }

    /// Every date-like field present on the record, in no particular order.
    pub fn date_candidates(&self) -> Vec<Option<&Bson>> {
        match self {
            Self::Sale(d) => vec![
                d.date.as_ref(),
                d.invoice_date.as_ref(),
                d.sale_date.as_ref(),
                d.saved_at.as_ref(),
                d.created_at.as_ref(),
                d.updated_at.as_ref(),
            ],
            Self::Purchase(d) => vec![
                d.date.as_ref(),
                d.bill_date.as_ref(),
                d.invoice_date.as_ref(),
                d.purchase_date.as_ref(),
                d.saved_at.as_ref(),
                d.created_at.as_ref(),
                d.updated_at.as_ref(),
            ],
            Self::NewSale(d) => vec![
                d.date.as_ref(),
                d.invoice_date.as_ref(),
                d.saved_at.as_ref(),
                d.created_at.as_ref(),
                d.updated_at.as_ref(),
                original_created_at(&d.original_document),
            ],
            Self::NewPurchase(d) => vec![
                d.date.as_ref(),
                d.bill_date.as_ref(),
                d.invoice_date.as_ref(),
                d.saved_at.as_ref(),
                d.created_at.as_ref(),
                d.updated_at.as_ref(),
                original_created_at(&d.original_document),
            ],
            Self::SaleReturn(d) => vec![
                d.date.as_ref(),
                d.return_date.as_ref(),
                d.saved_at.as_ref(),
                d.created_at.as_ref(),
                d.updated_at.as_ref(),
                original_created_at(&d.original_document),
            ],
            Self::PurchaseReturn(d) => vec![
                d.date.as_ref(),
                d.return_date.as_ref(),
                d.saved_at.as_ref(),
                d.created_at.as_ref(),
                d.updated_at.as_ref(),
                original_created_at(&d.original_document),
            ],
        }
    }

    /// Primary date the reader sorts on.
    pub fn primary_date(&self) -> Option<&Bson> {
        match self {
            Self::Sale(d) => first_date([&d.invoice_date, &d.sale_date]),
            Self::Purchase(d) => first_date([&d.bill_date, &d.invoice_date, &d.purchase_date]),
            Self::NewSale(d) => d.invoice_date.as_ref(),
            Self::NewPurchase(d) => first_date([&d.bill_date, &d.invoice_date]),
            Self::SaleReturn(d) => d.return_date.as_ref(),
            Self::PurchaseReturn(d) => d.return_date.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use rust_decimal_macros::dec;

    #[test]
    fn test_source_tag_resolution() {
        assert_eq!(DocumentKind::from_source_tag("sale"), Some(DocumentKind::Sale));
        assert_eq!(
            DocumentKind::from_source_tag("newsale_payment"),
            Some(DocumentKind::NewSale)
        );
        assert_eq!(
            DocumentKind::from_source_tag("Sale_Return"),
            Some(DocumentKind::SaleReturn)
        );
        assert_eq!(
            DocumentKind::from_source_tag("purchasereturns"),
            Some(DocumentKind::PurchaseReturn)
        );
        assert_eq!(DocumentKind::from_source_tag("cashbook"), None);
        assert_eq!(DocumentKind::from_source_tag(""), None);
    }

    #[test]
    fn test_amount_fallback_chain() {
        let sale = SourceDocument::NewSale(NewSaleInvoice {
            total_amount: Some(dec!(1200)),
            balance_amount: Some(dec!(200)),
            ..Default::default()
        });
        assert_eq!(sale.amount(), dec!(1200));

        let bare = SourceDocument::Sale(SaleInvoice {
            balance_amount: Some(dec!(75)),
            ..Default::default()
        });
        assert_eq!(bare.amount(), dec!(75));

        let empty = SourceDocument::PurchaseReturn(PurchaseReturn::default());
        assert_eq!(empty.amount(), Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_legacy_purchase_field_names() {
        let raw = doc! {
            "_id": "p-1",
            "businessId": "biz-1",
            "partyId": "party-1",
            "invoiceNo": "PUR-7",
            "purchaseDate": "2024-03-01",
            "invoiceAmount": 1500.0,
            "paymentStatus": "Unpaid",
        };

        let purchase: PurchaseInvoice = bson::from_document(raw).unwrap();
        assert_eq!(purchase.invoice_amount, Some(dec!(1500)));
        assert_eq!(purchase.payment_status.as_deref(), Some("Unpaid"));
        assert!(!purchase.is_deleted);

        let doc = SourceDocument::Purchase(purchase);
        assert_eq!(doc.number(), Some("PUR-7"));
        assert_eq!(
            doc.primary_date(),
            Some(&Bson::String("2024-03-01".to_string()))
        );
    }

    #[test]
    fn test_coexisting_field_variants_deserialize() {
        let raw = doc! {
            "_id": "p-1",
            "businessId": "biz-1",
            "partyId": "party-1",
            "billNo": "PUR-7",
            "invoiceNo": "PUR-7-OLD",
            "billDate": "2024-03-01",
            "invoiceDate": "2024-03-05",
            "invoiceAmount": 1500.0,
        };

        let purchase: PurchaseInvoice = bson::from_document(raw).unwrap();
        let doc = SourceDocument::Purchase(purchase);
        assert_eq!(doc.number(), Some("PUR-7"));
        assert_eq!(
            doc.primary_date(),
            Some(&Bson::String("2024-03-01".to_string()))
        );
        assert_eq!(doc.date_candidates().iter().flatten().count(), 2);

        let raw = doc! {
            "_id": "n-1",
            "businessId": "biz-1",
            "partyId": "party-1",
            "billNo": "",
            "invoiceNo": "PUR-8",
            "billDate": "2024-02-01",
            "invoiceDate": "2024-02-02",
        };
        let purchase: NewPurchaseInvoice = bson::from_document(raw).unwrap();
        assert_eq!(SourceDocument::NewPurchase(purchase).number(), Some("PUR-8"));
    }

    #[test]
    fn test_object_id_keys_read_as_hex() {
        let oid = ObjectId::new();
        let raw = doc! {
            "_id": oid,
            "businessId": "biz-1",
            "partyId": "party-1",
            "invoiceNo": "INV-1",
        };

        let sale: SaleInvoice = bson::from_document(raw).unwrap();
        assert_eq!(sale.id, oid.to_hex());

        let bad = doc! { "_id": 42, "businessId": "biz-1", "partyId": "party-1" };
        assert!(SourceDocument::from_document(DocumentKind::SaleReturn, bad).is_err());
    }

    #[test]
    fn test_original_document_date_is_a_candidate() {
        let created = Bson::String("2024-01-05T10:00:00Z".to_string());
        let sale = SourceDocument::NewSale(NewSaleInvoice {
            original_document: Some(OriginalDocument {
                created_at: Some(created.clone()),
            }),
            ..Default::default()
        });
        assert!(sale.date_candidates().contains(&Some(&created)));
    }
}
