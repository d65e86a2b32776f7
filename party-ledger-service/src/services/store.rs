//! Storage seam for the ledger.
//!
//! Every read is scoped to one business. Readers never return soft-deleted
//! rows, and list calls return rows newest-first by the collection's primary
//! date field.

use crate::models::{DocumentKind, LedgerTransaction, Party, SourceDocument};
use async_trait::async_trait;
use service_core::error::AppError;

#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Party by id regardless of tenant or deletion; callers check both.
    async fn find_party(&self, party_id: &str) -> Result<Option<Party>, AppError>;

    async fn insert_party(&self, party: &Party) -> Result<(), AppError>;

    /// Replace a stored party. Fails with `NotFound` when it does not exist.
    async fn save_party(&self, party: &Party) -> Result<(), AppError>;

    /// Live transactions of one party.
    async fn list_transactions(
        &self,
        tenant_id: &str,
        party_id: &str,
    ) -> Result<Vec<LedgerTransaction>, AppError>;

    /// Live transaction by id within one business.
    async fn get_transaction(
        &self,
        tenant_id: &str,
        transaction_id: &str,
    ) -> Result<Option<LedgerTransaction>, AppError>;

    async fn insert_transaction(&self, txn: &LedgerTransaction) -> Result<(), AppError>;

    async fn save_transaction(&self, txn: &LedgerTransaction) -> Result<(), AppError>;

    /// Live documents of one kind for one party.
    async fn list_documents(
        &self,
        kind: DocumentKind,
        tenant_id: &str,
        party_id: &str,
    ) -> Result<Vec<SourceDocument>, AppError>;

    /// Live documents of one kind by id, for `linked` resolution.
    async fn find_documents(
        &self,
        kind: DocumentKind,
        tenant_id: &str,
        ids: &[String],
    ) -> Result<Vec<SourceDocument>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
