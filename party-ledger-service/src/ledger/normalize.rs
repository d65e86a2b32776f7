//! Mapping of transactions and documents onto canonical ledger entries.

use super::dates::effective_timestamp;
use super::reference::{InferredReference, infer_reference};
use super::status::{PAYMENT_STATUS, document_status, transaction_status};
use crate::models::{
    Category, DocRef, DocumentKind, LedgerEntry, LedgerTransaction, LinkedRef, SourceDocument,
    SourceKind, TransactionType,
};
use std::collections::HashMap;

/// Documents prefetched for `linked` resolution, keyed by kind and id.
#[derive(Debug, Clone, Default)]
pub struct LinkedDocuments {
    documents: HashMap<(DocumentKind, String), SourceDocument>,
}

impl LinkedDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, doc: SourceDocument) {
        self.documents.insert((doc.kind(), doc.id().to_string()), doc);
    }

    pub fn get(&self, kind: DocumentKind, id: &str) -> Option<&SourceDocument> {
        self.documents.get(&(kind, id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl FromIterator<SourceDocument> for LinkedDocuments {
    fn from_iter<I: IntoIterator<Item = SourceDocument>>(iter: I) -> Self {
        let mut linked = Self::new();
        for doc in iter {
            linked.insert(doc);
        }
        linked
    }
}

/// Where a transaction's category and reference come from, highest priority first.
enum TransactionOrigin<'a> {
    /// Link resolved to a prefetched document.
    Linked {
        target: &'a SourceDocument,
        payment: bool,
    },
    /// Settlement whose document could not be resolved.
    Settlement(Option<InferredReference>),
    /// Invoice-like token found in the description.
    Inferred(InferredReference),
    Plain,
}

impl<'a> TransactionOrigin<'a> {
    fn resolve(
        txn: &LedgerTransaction,
        link: Option<&LinkedRef>,
        linked: &'a LinkedDocuments,
    ) -> Self {
        let description = txn.description.as_deref().unwrap_or_default();

        if let Some(link) = link {
            let target = link
                .document_kind()
                .and_then(|kind| linked.get(kind, &link.ref_id));
            if let Some(target) = target {
                return Self::Linked {
                    target,
                    payment: link.is_payment(),
                };
            }
            if link.is_payment() {
                return Self::Settlement(infer_reference(description));
            }
        }

        match infer_reference(description) {
            Some(inferred) => Self::Inferred(inferred),
            None => Self::Plain,
        }
    }
}

fn type_category(txn_type: TransactionType) -> Category {
    match txn_type {
        TransactionType::YouGave => Category::YouGave,
        TransactionType::YouGot => Category::YouGot,
    }
}

fn document_reference(doc: &SourceDocument) -> String {
    doc.number()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .or_else(|| doc.notes())
        .unwrap_or_default()
        .to_string()
}

/// Canonical entry for a manual transaction.
pub fn normalize_transaction(txn: &LedgerTransaction, linked: &LinkedDocuments) -> LedgerEntry {
    let link = txn.linked_ref();
    let description = txn.description.clone().unwrap_or_default();

    let (category, reference, status) =
        match TransactionOrigin::resolve(txn, link.as_ref(), linked) {
            TransactionOrigin::Linked { target, payment } => (
                target.kind().category(),
                document_reference(target),
                if payment {
                    PAYMENT_STATUS.to_string()
                } else {
                    document_status(target)
                },
            ),
            TransactionOrigin::Settlement(Some(inferred)) => (
                inferred.category,
                inferred.reference,
                PAYMENT_STATUS.to_string(),
            ),
            TransactionOrigin::Settlement(None) => (
                type_category(txn.txn_type),
                description,
                PAYMENT_STATUS.to_string(),
            ),
            TransactionOrigin::Inferred(inferred) => {
                (inferred.category, inferred.reference, transaction_status(txn))
            }
            TransactionOrigin::Plain => {
                (type_category(txn.txn_type), description, transaction_status(txn))
            }
        };

    let doc_ref = link.as_ref().and_then(|l| {
        l.document_kind().map(|kind| DocRef {
            kind,
            id: l.ref_id.clone(),
        })
    });

    LedgerEntry {
        id: LedgerEntry::entry_id(SourceKind::Transaction, &txn.id),
        amount: txn.amount,
        category,
        reference,
        date: effective_timestamp([
            txn.date.as_ref(),
            txn.saved_at.as_ref(),
            txn.created_at.as_ref(),
            txn.updated_at.as_ref(),
        ]),
        status,
        source_kind: SourceKind::Transaction,
        source_id: txn.id.clone(),
        doc_ref,
    }
}

/// Canonical entry for an invoice or return read from its own collection.
pub fn normalize_document(doc: &SourceDocument) -> LedgerEntry {
    let kind = doc.kind();
    let source_kind = SourceKind::from(kind);

    LedgerEntry {
        id: LedgerEntry::entry_id(source_kind, doc.id()),
        amount: doc.amount(),
        category: kind.category(),
        reference: document_reference(doc),
        date: effective_timestamp(doc.date_candidates()),
        status: document_status(doc),
        source_kind,
        source_id: doc.id().to_string(),
        doc_ref: Some(DocRef {
            kind,
            id: doc.id().to_string(),
        }),
    }
}
