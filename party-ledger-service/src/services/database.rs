//! MongoDB-backed [`LedgerStore`].

use crate::models::{DocumentKind, LedgerTransaction, Party, SourceDocument};
use crate::services::metrics::{record_skipped_document, record_store_query};
use crate::services::store::LedgerStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use std::time::Instant;
use tracing::{instrument, warn};

const PARTIES: &str = "parties";
const TRANSACTIONS: &str = "transactions";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

fn live() -> Document {
    doc! { "$ne": true }
}

fn party_scope(tenant_id: &str, party_id: &str) -> Document {
    doc! {
        "businessId": tenant_id,
        "partyId": party_id,
        "isDeleted": live(),
    }
}

/// Prefetch filter for linked documents. Ids that look like ObjectIds are
/// matched in both forms.
fn linked_scope(tenant_id: &str, ids: &[String]) -> Document {
    let candidates: Vec<Bson> = ids
        .iter()
        .flat_map(|id| {
            let oid = ObjectId::parse_str(id).ok().map(Bson::ObjectId);
            std::iter::once(Bson::String(id.clone())).chain(oid)
        })
        .collect();

    doc! {
        "_id": { "$in": candidates },
        "businessId": tenant_id,
        "isDeleted": live(),
    }
}

/// Decode raw records of one kind, skipping the ones that cannot be read.
fn decode_documents(kind: DocumentKind, raw: Vec<Document>) -> Vec<SourceDocument> {
    raw.into_iter()
        .filter_map(|doc| {
            let id = doc.get("_id").cloned();
            match SourceDocument::from_document(kind, doc) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    warn!(kind = %kind, id = ?id, error = %e, "Skipping unreadable document");
                    record_skipped_document(kind.as_str());
                    None
                }
            }
        })
        .collect()
}

fn newest_first(field: &str) -> FindOptions {
    let mut sort = Document::new();
    sort.insert(field, -1);
    sort.insert("_id", -1);
    FindOptions::builder().sort(sort).build()
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for party-ledger-service");

        let tenant_index = IndexModel::builder()
            .keys(doc! { "businessId": 1 })
            .options(
                IndexOptions::builder()
                    .name("tenant_lookup".to_string())
                    .build(),
            )
            .build();
        self.parties()
            .create_index(tenant_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create tenant index on parties collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on parties.businessId");

        let party_collections = std::iter::once(TRANSACTIONS)
            .chain(DocumentKind::ALL.iter().map(|kind| kind.collection()));

        for name in party_collections {
            let party_index = IndexModel::builder()
                .keys(doc! { "businessId": 1, "partyId": 1 })
                .options(
                    IndexOptions::builder()
                        .name("tenant_party_lookup".to_string())
                        .build(),
                )
                .build();

            self.db
                .collection::<Document>(name)
                .create_index(party_index, None)
                .await
                .map_err(|e| {
                    tracing::error!(
                        "Failed to create tenant_party index on {} collection: {}",
                        name,
                        e
                    );
                    AppError::from(e)
                })?;
            tracing::info!("Created index on {}.(businessId, partyId)", name);
        }

        Ok(())
    }

    pub fn parties(&self) -> Collection<Party> {
        self.db.collection(PARTIES)
    }

    pub fn transactions(&self) -> Collection<LedgerTransaction> {
        self.db.collection(TRANSACTIONS)
    }

    async fn find_all<T>(
        &self,
        collection: &str,
        filter: Document,
        options: Option<FindOptions>,
    ) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        let cursor = self
            .db
            .collection::<T>(collection)
            .find(filter, options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_kind(
        &self,
        kind: DocumentKind,
        filter: Document,
        options: Option<FindOptions>,
    ) -> Result<Vec<SourceDocument>, AppError> {
        let raw = self
            .find_all::<Document>(kind.collection(), filter, options)
            .await?;
        Ok(decode_documents(kind, raw))
    }
}

#[async_trait]
impl LedgerStore for MongoDb {
    #[instrument(skip(self))]
    async fn find_party(&self, party_id: &str) -> Result<Option<Party>, AppError> {
        let start = Instant::now();
        let party = self.parties().find_one(doc! { "_id": party_id }, None).await?;
        record_store_query("find_party", start.elapsed());
        Ok(party)
    }

    #[instrument(skip(self, party), fields(tenant_id = %party.tenant_id, party_id = %party.id))]
    async fn insert_party(&self, party: &Party) -> Result<(), AppError> {
        let start = Instant::now();
        self.parties().insert_one(party, None).await?;
        record_store_query("insert_party", start.elapsed());
        Ok(())
    }

    #[instrument(skip(self, party), fields(tenant_id = %party.tenant_id, party_id = %party.id))]
    async fn save_party(&self, party: &Party) -> Result<(), AppError> {
        let start = Instant::now();
        let result = self
            .parties()
            .replace_one(doc! { "_id": &party.id }, party, None)
            .await?;
        record_store_query("save_party", start.elapsed());

        if result.matched_count == 0 {
            return Err(AppError::NotFound(anyhow::anyhow!(
                "Party not found: {}",
                party.id
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_transactions(
        &self,
        tenant_id: &str,
        party_id: &str,
    ) -> Result<Vec<LedgerTransaction>, AppError> {
        let start = Instant::now();
        let txns = self
            .find_all(
                TRANSACTIONS,
                party_scope(tenant_id, party_id),
                Some(newest_first("date")),
            )
            .await?;
        record_store_query("list_transactions", start.elapsed());
        Ok(txns)
    }

    #[instrument(skip(self))]
    async fn get_transaction(
        &self,
        tenant_id: &str,
        transaction_id: &str,
    ) -> Result<Option<LedgerTransaction>, AppError> {
        let start = Instant::now();
        let txn = self
            .transactions()
            .find_one(
                doc! {
                    "_id": transaction_id,
                    "businessId": tenant_id,
                    "isDeleted": live(),
                },
                None,
            )
            .await?;
        record_store_query("get_transaction", start.elapsed());
        Ok(txn)
    }

    #[instrument(skip(self, txn), fields(tenant_id = %txn.tenant_id, party_id = %txn.party_id))]
    async fn insert_transaction(&self, txn: &LedgerTransaction) -> Result<(), AppError> {
        let start = Instant::now();
        self.transactions().insert_one(txn, None).await?;
        record_store_query("insert_transaction", start.elapsed());
        Ok(())
    }

    #[instrument(skip(self, txn), fields(tenant_id = %txn.tenant_id, transaction_id = %txn.id))]
    async fn save_transaction(&self, txn: &LedgerTransaction) -> Result<(), AppError> {
        let start = Instant::now();
        let result = self
            .transactions()
            .replace_one(
                doc! { "_id": &txn.id, "businessId": &txn.tenant_id },
                txn,
                None,
            )
            .await?;
        record_store_query("save_transaction", start.elapsed());

        if result.matched_count == 0 {
            return Err(AppError::NotFound(anyhow::anyhow!(
                "Transaction not found: {}",
                txn.id
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_documents(
        &self,
        kind: DocumentKind,
        tenant_id: &str,
        party_id: &str,
    ) -> Result<Vec<SourceDocument>, AppError> {
        let start = Instant::now();
        let docs = self
            .find_kind(
                kind,
                party_scope(tenant_id, party_id),
                Some(newest_first(kind.primary_date_field())),
            )
            .await?;
        record_store_query("list_documents", start.elapsed());
        Ok(docs)
    }

    #[instrument(skip(self, ids), fields(id_count = ids.len()))]
    async fn find_documents(
        &self,
        kind: DocumentKind,
        tenant_id: &str,
        ids: &[String],
    ) -> Result<Vec<SourceDocument>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let docs = self
            .find_kind(kind, linked_scope(tenant_id, ids), None)
            .await?;
        record_store_query("find_documents", start.elapsed());
        Ok(docs)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
