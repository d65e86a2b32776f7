use super::parties::PartyResponse;
use crate::models::{Category, DocRef, FieldDescriptor, Ledger, LedgerEntry, SourceKind};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryResponse {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: Category,
    pub reference: String,
    pub date: String,
    pub status: String,
    pub source_kind: SourceKind,
    pub source_id: String,
    pub doc_ref: Option<DocRef>,
}

impl From<LedgerEntry> for LedgerEntryResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            id: entry.id,
            amount: entry.amount,
            category: entry.category,
            reference: entry.reference,
            date: entry.date.to_rfc3339(),
            status: entry.status,
            source_kind: entry.source_kind,
            source_id: entry.source_id,
            doc_ref: entry.doc_ref,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    pub party: PartyResponse,
    pub entries: Vec<LedgerEntryResponse>,
    pub fields: &'static [FieldDescriptor],
}

impl From<Ledger> for LedgerResponse {
    fn from(ledger: Ledger) -> Self {
        Self {
            party: PartyResponse::from(ledger.party),
            entries: ledger.entries.into_iter().map(Into::into).collect(),
            fields: ledger.fields,
        }
    }
}
