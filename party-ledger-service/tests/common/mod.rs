//! Common test utilities for party-ledger-service integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mongodb::bson::Bson;
use party_ledger_service::config::{LedgerConfig, MongoConfig};
use party_ledger_service::ledger::dates::parse_loose_date;
use party_ledger_service::models::{
    BalanceType, DocumentKind, LedgerTransaction, NewPurchaseInvoice, NewSaleInvoice, Party,
    PurchaseInvoice, PurchaseReturn, SaleInvoice, SaleReturn, SourceDocument, TransactionType,
};
use party_ledger_service::services::{LedgerService, LedgerStore};
use party_ledger_service::startup::AppState;
use rust_decimal::Decimal;
use service_core::config::Config as CommonConfig;
use service_core::error::AppError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static INIT: Once = Once::new();

pub const TENANT: &str = "biz-1";
pub const OTHER_TENANT: &str = "biz-2";

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,party_ledger_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[derive(Default)]
struct Tables {
    parties: HashMap<String, Party>,
    transactions: Vec<LedgerTransaction>,
    documents: Vec<SourceDocument>,
}

/// In-memory [`LedgerStore`] honouring the same scoping rules as MongoDB.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    /// Readers of this kind fail outright.
    failing_kind: Mutex<Option<DocumentKind>>,
    /// Every document reader sleeps this long first.
    reader_delay: Mutex<Option<Duration>>,
    /// Party lookups sleep this long first.
    party_delay: Mutex<Option<Duration>>,
    /// `(kind, ids)` of every prefetch batch.
    prefetches: Mutex<Vec<(DocumentKind, Vec<String>)>>,
}

fn newest_first(date: Option<&Bson>) -> i64 {
    -date
        .and_then(parse_loose_date)
        .map(|d| d.timestamp_millis())
        .unwrap_or(0)
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_party(&self, party: Party) {
        self.tables
            .lock()
            .unwrap()
            .parties
            .insert(party.id.clone(), party);
    }

    pub fn add_transaction(&self, txn: LedgerTransaction) {
        self.tables.lock().unwrap().transactions.push(txn);
    }

    pub fn add_document(&self, doc: SourceDocument) {
        self.tables.lock().unwrap().documents.push(doc);
    }

    pub fn party(&self, id: &str) -> Party {
        self.tables.lock().unwrap().parties[id].clone()
    }

    pub fn transaction(&self, id: &str) -> LedgerTransaction {
        self.tables
            .lock()
            .unwrap()
            .transactions
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .expect("transaction exists")
    }

    pub fn fail_reader(&self, kind: DocumentKind) {
        *self.failing_kind.lock().unwrap() = Some(kind);
    }

    pub fn delay_readers(&self, delay: Duration) {
        *self.reader_delay.lock().unwrap() = Some(delay);
    }

    pub fn delay_party_lookup(&self, delay: Duration) {
        *self.party_delay.lock().unwrap() = Some(delay);
    }

    pub fn prefetches(&self) -> Vec<(DocumentKind, Vec<String>)> {
        self.prefetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerStore for InMemoryStore {
    async fn find_party(&self, party_id: &str) -> Result<Option<Party>, AppError> {
        let delay = *self.party_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.tables.lock().unwrap().parties.get(party_id).cloned())
    }

    async fn insert_party(&self, party: &Party) -> Result<(), AppError> {
        self.add_party(party.clone());
        Ok(())
    }

    async fn save_party(&self, party: &Party) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.parties.get_mut(&party.id) {
            Some(stored) => {
                *stored = party.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(anyhow::anyhow!("Party not found"))),
        }
    }

    async fn list_transactions(
        &self,
        tenant_id: &str,
        party_id: &str,
    ) -> Result<Vec<LedgerTransaction>, AppError> {
        let mut txns: Vec<_> = self
            .tables
            .lock()
            .unwrap()
            .transactions
            .iter()
            .filter(|t| t.tenant_id == tenant_id && t.party_id == party_id && !t.is_deleted)
            .cloned()
            .collect();
        txns.sort_by_key(|t| newest_first(t.date.as_ref()));
        Ok(txns)
    }

    async fn get_transaction(
        &self,
        tenant_id: &str,
        transaction_id: &str,
    ) -> Result<Option<LedgerTransaction>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .transactions
            .iter()
            .find(|t| t.id == transaction_id && t.tenant_id == tenant_id && !t.is_deleted)
            .cloned())
    }

    async fn insert_transaction(&self, txn: &LedgerTransaction) -> Result<(), AppError> {
        self.add_transaction(txn.clone());
        Ok(())
    }

    async fn save_transaction(&self, txn: &LedgerTransaction) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        match tables
            .transactions
            .iter_mut()
            .find(|t| t.id == txn.id && t.tenant_id == txn.tenant_id)
        {
            Some(stored) => {
                *stored = txn.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(anyhow::anyhow!("Transaction not found"))),
        }
    }

    async fn list_documents(
        &self,
        kind: DocumentKind,
        tenant_id: &str,
        party_id: &str,
    ) -> Result<Vec<SourceDocument>, AppError> {
        let delay = *self.reader_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.failing_kind.lock().unwrap() == Some(kind) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "{} collection unavailable",
                kind.collection()
            )));
        }

        let mut docs: Vec<_> = self
            .tables
            .lock()
            .unwrap()
            .documents
            .iter()
            .filter(|d| {
                d.kind() == kind
                    && d.tenant_id() == tenant_id
                    && d.party_id() == party_id
                    && !d.is_deleted()
            })
            .cloned()
            .collect();
        docs.sort_by_key(|d| newest_first(d.primary_date()));
        Ok(docs)
    }

    async fn find_documents(
        &self,
        kind: DocumentKind,
        tenant_id: &str,
        ids: &[String],
    ) -> Result<Vec<SourceDocument>, AppError> {
        self.prefetches.lock().unwrap().push((kind, ids.to_vec()));
        Ok(self
            .tables
            .lock()
            .unwrap()
            .documents
            .iter()
            .filter(|d| {
                d.kind() == kind
                    && d.tenant_id() == tenant_id
                    && ids.iter().any(|id| id == d.id())
                    && !d.is_deleted()
            })
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub fn test_config(read_timeout: Duration) -> LedgerConfig {
    LedgerConfig {
        common: CommonConfig {
            port: 0,
            environment: "test".to_string(),
        },
        service_name: "party-ledger-service-test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        mongodb: MongoConfig {
            uri: "mongodb://unused".to_string(),
            database: "billing_test".to_string(),
        },
        read_timeout,
    }
}

/// Ledger service over a fresh in-memory store.
pub fn spawn_service() -> (LedgerService, Arc<InMemoryStore>) {
    spawn_service_with_timeout(Duration::from_secs(5))
}

pub fn spawn_service_with_timeout(read_timeout: Duration) -> (LedgerService, Arc<InMemoryStore>) {
    init_tracing();
    let store = InMemoryStore::new();
    let service = LedgerService::new(store.clone(), read_timeout);
    (service, store)
}

pub fn spawn_state() -> (AppState, Arc<InMemoryStore>) {
    init_tracing();
    let store = InMemoryStore::new();
    let state = AppState::new(test_config(Duration::from_secs(5)), store.clone());
    (state, store)
}

// -----------------------------------------------------------------------------
// Fixtures
// -----------------------------------------------------------------------------

pub fn party(id: &str, tenant_id: &str, opening: Decimal, balance_type: BalanceType) -> Party {
    let mut party = Party::new(
        tenant_id.to_string(),
        format!("Party {}", id),
        None,
        opening,
        balance_type,
    );
    party.id = id.to_string();
    party
}

pub fn date(raw: &str) -> Option<Bson> {
    Some(Bson::String(raw.to_string()))
}

pub fn manual(
    id: &str,
    party_id: &str,
    txn_type: TransactionType,
    amount: Decimal,
    description: &str,
    on: &str,
) -> LedgerTransaction {
    LedgerTransaction {
        id: id.to_string(),
        tenant_id: TENANT.to_string(),
        party_id: party_id.to_string(),
        amount,
        txn_type,
        description: Some(description.to_string()),
        date: date(on),
        linked: None,
        status: None,
        saved_at: None,
        created_at: None,
        updated_at: None,
        is_deleted: false,
        deleted_at: None,
    }
}

pub fn linked(source: &str, ref_id: &str) -> Option<Bson> {
    Some(Bson::Document(mongodb::bson::doc! {
        "source": source,
        "refId": ref_id,
    }))
}

pub fn sale(id: &str, party_id: &str, number: &str, amount: Decimal, on: &str) -> SaleInvoice {
    SaleInvoice {
        id: id.to_string(),
        tenant_id: TENANT.to_string(),
        party_id: party_id.to_string(),
        invoice_no: Some(number.to_string()),
        invoice_date: date(on),
        invoice_amount: Some(amount),
        ..Default::default()
    }
}

pub fn purchase(id: &str, party_id: &str, number: &str, amount: Decimal, on: &str) -> PurchaseInvoice {
    PurchaseInvoice {
        id: id.to_string(),
        tenant_id: TENANT.to_string(),
        party_id: party_id.to_string(),
        bill_no: Some(number.to_string()),
        bill_date: date(on),
        invoice_amount: Some(amount),
        ..Default::default()
    }
}

pub fn new_sale(id: &str, party_id: &str, number: &str, amount: Decimal, on: &str) -> NewSaleInvoice {
    NewSaleInvoice {
        id: id.to_string(),
        tenant_id: TENANT.to_string(),
        party_id: party_id.to_string(),
        invoice_no: Some(number.to_string()),
        invoice_date: date(on),
        invoice_amount: Some(amount),
        ..Default::default()
    }
}

pub fn new_purchase(
    id: &str,
    party_id: &str,
    number: &str,
    amount: Decimal,
    on: &str,
) -> NewPurchaseInvoice {
    NewPurchaseInvoice {
        id: id.to_string(),
        tenant_id: TENANT.to_string(),
        party_id: party_id.to_string(),
        bill_no: Some(number.to_string()),
        bill_date: date(on),
        total_amount: Some(amount),
        ..Default::default()
    }
}

pub fn sale_return(id: &str, party_id: &str, number: &str, amount: Decimal, on: &str) -> SaleReturn {
    SaleReturn {
        id: id.to_string(),
        tenant_id: TENANT.to_string(),
        party_id: party_id.to_string(),
        return_no: Some(number.to_string()),
        return_date: date(on),
        total_amount: Some(amount),
        ..Default::default()
    }
}

pub fn purchase_return(
    id: &str,
    party_id: &str,
    number: &str,
    amount: Decimal,
    on: &str,
) -> PurchaseReturn {
    PurchaseReturn {
        id: id.to_string(),
        tenant_id: TENANT.to_string(),
        party_id: party_id.to_string(),
        return_no: Some(number.to_string()),
        return_date: date(on),
        total_amount: Some(amount),
        ..Default::default()
    }
}
