//! Pure reconciliation engine: normalise, merge, order.
//!
//! Nothing in here touches the store. [`assemble`] takes everything the
//! readers returned and produces the rows a ledger read hands back.

pub mod balance;
pub mod dates;
pub mod dedup;
pub mod normalize;
pub mod reference;
pub mod sequence;
pub mod status;

pub use balance::{fold_balance, rebase_opening_balance, signed_delta};
pub use dedup::{Merged, merge};
pub use normalize::{LinkedDocuments, normalize_document, normalize_transaction};
pub use reference::{InferredReference, infer_reference};
pub use status::{NO_STATUS, document_status};

use crate::models::{LedgerEntry, LedgerTransaction, SourceDocument};

/// Result of assembling one party's rows.
#[derive(Debug, Clone)]
pub struct Assembled {
    pub entries: Vec<LedgerEntry>,
    /// Rows before deduplication.
    pub candidates: usize,
    pub duplicates: usize,
}

/// Build the ledger rows for one party.
///
/// Transactions are merged before documents, so on a dedup tie with no status
/// on either side the transaction row is the one kept.
pub fn assemble(
    transactions: &[LedgerTransaction],
    documents: &[SourceDocument],
    linked: &LinkedDocuments,
) -> Assembled {
    let normalized: Vec<LedgerEntry> = transactions
        .iter()
        .filter(|t| !t.is_deleted)
        .map(|t| normalize_transaction(t, linked))
        .chain(
            documents
                .iter()
                .filter(|d| !d.is_deleted())
                .map(normalize_document),
        )
        .collect();
    let candidates = normalized.len();

    let Merged {
        mut entries,
        duplicates,
    } = merge(normalized);
    sequence::sequence(&mut entries);

    Assembled {
        entries,
        candidates,
        duplicates,
    }
}
