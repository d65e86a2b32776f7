//! Domain models for party-ledger-service.

mod documents;
mod entry;
mod party;
mod transaction;

pub use documents::{
    DocumentKind, NewPurchaseInvoice, NewSaleInvoice, OriginalDocument, PurchaseInvoice,
    PurchaseReturn, SaleInvoice, SaleReturn, SourceDocument,
};
pub use entry::{Category, DocRef, FieldDescriptor, LEDGER_FIELDS, Ledger, LedgerEntry, SourceKind};
pub use party::{BalanceType, NewParty, Party};
pub use transaction::{
    LedgerTransaction, LinkedRef, NewTransaction, TransactionType, TransactionUpdate,
};
