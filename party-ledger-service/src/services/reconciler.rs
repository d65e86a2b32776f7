//! Ledger reads and balance-affecting mutations for one party at a time.

use crate::ledger::{self, LinkedDocuments, fold_balance, rebase_opening_balance};
use crate::models::{
    BalanceType, DocumentKind, LEDGER_FIELDS, Ledger, LedgerTransaction, NewParty,
    NewTransaction, Party, SourceDocument, TransactionUpdate,
};
use crate::services::error::LedgerError;
use crate::services::metrics::{record_duplicates, record_ledger_read, record_recompute};
use crate::services::store::LedgerStore;
use futures::future::try_join_all;
use rust_decimal::Decimal;
use service_core::error::AppError;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// A transaction after a mutation, with the party balance recomputed from it.
#[derive(Debug, Clone)]
pub struct TransactionOutcome {
    pub transaction: LedgerTransaction,
    pub party: Party,
}

#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    read_timeout: Duration,
}

impl LedgerService {
    pub fn new(store: Arc<dyn LedgerStore>, read_timeout: Duration) -> Self {
        Self {
            store,
            read_timeout,
        }
    }

    pub fn store(&self) -> &Arc<dyn LedgerStore> {
        &self.store
    }

    /// Party visible to `tenant_id`, or the reason it is not.
    async fn load_party(&self, tenant_id: &str, party_id: &str) -> Result<Party, LedgerError> {
        let party = self
            .store
            .find_party(party_id)
            .await?
            .ok_or_else(|| LedgerError::PartyNotFound(party_id.to_string()))?;

        if party.tenant_id != tenant_id {
            warn!(party_id = %party_id, "Party requested by another business");
            return Err(LedgerError::TenantMismatch(party_id.to_string()));
        }
        if party.is_deleted {
            return Err(LedgerError::PartyDeleted(party_id.to_string()));
        }
        Ok(party)
    }

    /// Unified, deduplicated, newest-first history of one party.
    ///
    /// The party lookup, all readers and prefetches run under one read timeout;
    /// readers run concurrently and any failure fails the whole read.
    #[instrument(skip(self))]
    pub async fn get_ledger(&self, tenant_id: &str, party_id: &str) -> Result<Ledger, LedgerError> {
        let start = Instant::now();
        let result = self.read_ledger(tenant_id, party_id).await;

        let status = if result.is_ok() { "ok" } else { "error" };
        record_ledger_read(status, start.elapsed());
        result
    }

    async fn read_ledger(&self, tenant_id: &str, party_id: &str) -> Result<Ledger, LedgerError> {
        let read = async {
            let party = self.load_party(tenant_id, party_id).await?;

            let manual = async {
                let transactions = self.store.list_transactions(tenant_id, party_id).await?;
                let linked = self.prefetch_linked(tenant_id, &transactions).await?;
                Ok::<_, AppError>((transactions, linked))
            };
            let documents = try_join_all(
                DocumentKind::ALL
                    .iter()
                    .map(|kind| self.store.list_documents(*kind, tenant_id, party_id)),
            );

            let (manual, documents) = tokio::try_join!(manual, documents)?;
            Ok::<_, LedgerError>((party, manual, documents))
        };

        let (party, (transactions, linked), documents) =
            tokio::time::timeout(self.read_timeout, read)
                .await
                .map_err(|_| {
                    warn!(
                        timeout_ms = self.read_timeout.as_millis() as u64,
                        "Ledger read timed out"
                    );
                    LedgerError::ReadTimeout(party_id.to_string())
                })??;

        let documents: Vec<SourceDocument> = documents.into_iter().flatten().collect();
        let assembled = ledger::assemble(&transactions, &documents, &linked);
        record_duplicates(assembled.duplicates);

        info!(
            transactions = transactions.len(),
            documents = documents.len(),
            linked = linked.len(),
            candidates = assembled.candidates,
            duplicates = assembled.duplicates,
            entries = assembled.entries.len(),
            "Ledger assembled"
        );

        Ok(Ledger {
            party,
            entries: assembled.entries,
            fields: LEDGER_FIELDS,
        })
    }

    /// Fetch every document referenced by a `linked` back-reference, one
    /// batch per kind. Settlement tags resolve to the settled document's kind.
    async fn prefetch_linked(
        &self,
        tenant_id: &str,
        transactions: &[LedgerTransaction],
    ) -> Result<LinkedDocuments, AppError> {
        let mut wanted: BTreeMap<DocumentKind, BTreeSet<String>> = BTreeMap::new();
        for link in transactions
            .iter()
            .filter(|t| !t.is_deleted)
            .filter_map(LedgerTransaction::linked_ref)
        {
            if let Some(kind) = link.document_kind() {
                wanted.entry(kind).or_default().insert(link.ref_id);
            }
        }

        if wanted.is_empty() {
            return Ok(LinkedDocuments::new());
        }

        let batches = try_join_all(wanted.into_iter().map(|(kind, ids)| async move {
            let ids: Vec<String> = ids.into_iter().collect();
            self.store.find_documents(kind, tenant_id, &ids).await
        }))
        .await?;

        Ok(batches
            .into_iter()
            .flatten()
            .filter(|doc| doc.tenant_id() == tenant_id)
            .collect())
    }

    /// Rebuild the cached balance from the opening balance and every live
    /// transaction, then persist it.
    #[instrument(skip(self))]
    pub async fn recompute_balance(&self, tenant_id: &str, party_id: &str) -> Result<Party, LedgerError> {
        let mut party = self.load_party(tenant_id, party_id).await?;
        self.recompute(&mut party, "manual").await?;
        Ok(party)
    }

    async fn recompute(&self, party: &mut Party, trigger: &'static str) -> Result<(), LedgerError> {
        let transactions = self
            .store
            .list_transactions(&party.tenant_id, &party.id)
            .await?;

        let previous = party.balance;
        party.balance = fold_balance(party.opening_balance, &transactions);
        party.touch();
        self.store.save_party(party).await?;
        record_recompute(trigger);

        info!(
            party_id = %party.id,
            trigger,
            transactions = transactions.len(),
            previous = %previous,
            balance = %party.balance,
            "Party balance recomputed"
        );
        Ok(())
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_party(&self, tenant_id: &str, input: NewParty) -> Result<Party, LedgerError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidInput("party name is required".to_string()));
        }

        let party = Party::new(
            tenant_id.to_string(),
            name.to_string(),
            input.phone,
            input.opening_balance,
            input.balance_type,
        );
        self.store.insert_party(&party).await?;

        info!(party_id = %party.id, balance = %party.balance, "Party created");
        Ok(party)
    }

    #[instrument(skip(self))]
    pub async fn delete_party(&self, tenant_id: &str, party_id: &str) -> Result<Party, LedgerError> {
        let mut party = self.load_party(tenant_id, party_id).await?;
        party.mark_deleted();
        self.store.save_party(&party).await?;

        info!("Party soft-deleted");
        Ok(party)
    }

    /// Change the opening balance, keeping the accumulated transaction
    /// deltas. When `balance_type` is omitted the current type is kept.
    #[instrument(skip(self))]
    pub async fn update_opening_balance(
        &self,
        tenant_id: &str,
        party_id: &str,
        amount: Decimal,
        balance_type: Option<BalanceType>,
    ) -> Result<Party, LedgerError> {
        let mut party = self.load_party(tenant_id, party_id).await?;

        let balance_type = balance_type.unwrap_or_else(|| party.balance_type());
        let opening_balance = balance_type.normalize(amount);
        party.balance = rebase_opening_balance(party.balance, party.opening_balance, opening_balance);
        party.opening_balance = opening_balance;
        party.opening_balance_type = Some(balance_type);
        party.touch();
        self.store.save_party(&party).await?;
        record_recompute("opening_balance");

        info!(opening_balance = %opening_balance, balance = %party.balance, "Opening balance updated");
        Ok(party)
    }

    #[instrument(skip(self, input), fields(amount = %input.amount, txn_type = %input.txn_type))]
    pub async fn record_transaction(
        &self,
        tenant_id: &str,
        party_id: &str,
        input: NewTransaction,
    ) -> Result<TransactionOutcome, LedgerError> {
        ensure_positive(input.amount)?;
        let mut party = self.load_party(tenant_id, party_id).await?;

        let transaction =
            LedgerTransaction::new(tenant_id.to_string(), party_id.to_string(), input);
        self.store.insert_transaction(&transaction).await?;
        self.recompute(&mut party, "create").await?;

        info!(transaction_id = %transaction.id, "Transaction recorded");
        Ok(TransactionOutcome { transaction, party })
    }

    #[instrument(skip(self, update))]
    pub async fn update_transaction(
        &self,
        tenant_id: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<TransactionOutcome, LedgerError> {
        if let Some(amount) = update.amount {
            ensure_positive(amount)?;
        }
        let mut transaction = self.load_transaction(tenant_id, transaction_id).await?;
        let mut party = self.load_party(tenant_id, &transaction.party_id).await?;

        transaction.apply(update);
        self.store.save_transaction(&transaction).await?;
        self.recompute(&mut party, "update").await?;

        info!(party_id = %party.id, "Transaction updated");
        Ok(TransactionOutcome { transaction, party })
    }

    /// Soft-delete a transaction and rebuild the party balance without it.
    #[instrument(skip(self))]
    pub async fn delete_transaction(
        &self,
        tenant_id: &str,
        transaction_id: &str,
    ) -> Result<TransactionOutcome, LedgerError> {
        let mut transaction = self.load_transaction(tenant_id, transaction_id).await?;
        let mut party = self.load_party(tenant_id, &transaction.party_id).await?;

        transaction.mark_deleted();
        self.store.save_transaction(&transaction).await?;
        self.recompute(&mut party, "delete").await?;

        info!(party_id = %party.id, "Transaction deleted");
        Ok(TransactionOutcome { transaction, party })
    }

    async fn load_transaction(
        &self,
        tenant_id: &str,
        transaction_id: &str,
    ) -> Result<LedgerTransaction, LedgerError> {
        self.store
            .get_transaction(tenant_id, transaction_id)
            .await?
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction_id.to_string()))
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidInput(
            "amount must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
