//! Collapsing of rows that record the same economic event twice.
//!
//! Two rows are the same event when category, trimmed reference and amount
//! rounded to the cent all match. Distinct events that happen to share all three are
//! collapsed as well; callers that need them apart must make the references
//! differ.

use super::status::NO_STATUS;
use crate::models::{Category, LedgerEntry};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupKey {
    category: Category,
    reference: String,
    amount: Decimal,
}

impl DedupKey {
    fn of(entry: &LedgerEntry) -> Self {
        Self {
            category: entry.category,
            reference: entry.reference.trim().to_string(),
            amount: to_cents(entry.amount),
        }
    }
}

/// Amount rounded half away from zero to two places, with trailing zeros
/// stripped so `1500` and `1500.00` key alike. Stays exact at any magnitude.
fn to_cents(amount: Decimal) -> Decimal {
    amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Output of [`merge`].
#[derive(Debug, Clone)]
pub struct Merged {
    pub entries: Vec<LedgerEntry>,
    /// Rows dropped as duplicates.
    pub duplicates: usize,
}

/// Keep one row per key. The first row seen wins unless it has no status and
/// a later duplicate has one, in which case the later row takes its slot.
pub fn merge(entries: impl IntoIterator<Item = LedgerEntry>) -> Merged {
    let mut kept: Vec<LedgerEntry> = Vec::new();
    let mut slots: HashMap<DedupKey, usize> = HashMap::new();
    let mut duplicates = 0;

    for entry in entries {
        let key = DedupKey::of(&entry);
        match slots.get(&key).copied() {
            Some(slot) => {
                duplicates += 1;
                let current = &kept[slot];
                if current.status == NO_STATUS && entry.status != NO_STATUS {
                    tracing::debug!(
                        kept = %entry.id,
                        dropped = %current.id,
                        "Duplicate ledger entry replaced by richer copy"
                    );
                    kept[slot] = entry;
                } else {
                    tracing::debug!(
                        kept = %current.id,
                        dropped = %entry.id,
                        "Duplicate ledger entry dropped"
                    );
                }
            }
            None => {
                slots.insert(key, kept.len());
                kept.push(entry);
            }
        }
    }

    Merged {
        entries: kept,
        duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceKind;
    use chrono::DateTime;
    use rust_decimal_macros::dec;

    fn entry(id: &str, category: Category, reference: &str, amount: Decimal, status: &str) -> LedgerEntry {
        LedgerEntry {
            id: id.to_string(),
            amount,
            category,
            reference: reference.to_string(),
            date: DateTime::UNIX_EPOCH,
            status: status.to_string(),
            source_kind: SourceKind::Transaction,
            source_id: id.to_string(),
            doc_ref: None,
        }
    }

    #[test]
    fn test_cent_rounding() {
        assert_eq!(to_cents(dec!(1500)), dec!(1500));
        assert_eq!(to_cents(dec!(1500.004)), dec!(1500));
        assert_eq!(to_cents(dec!(0.005)), dec!(0.01));
        assert_eq!(to_cents(dec!(-0.005)), dec!(-0.01));
        assert_eq!(to_cents(dec!(1500.00)).scale(), 0);
    }

    #[test]
    fn test_amounts_beyond_i64_cents_stay_distinct() {
        let merged = merge([
            entry("a", Category::SalesInvoice, "BULK", dec!(100000000000000000000), "-"),
            entry("b", Category::SalesInvoice, "BULK", dec!(100000000000000000001), "-"),
            entry("c", Category::SalesInvoice, "BULK", dec!(100000000000000000000.00), "-"),
        ]);
        let ids: Vec<_> = merged.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(merged.duplicates, 1);
    }

    #[test]
    fn test_richer_copy_replaces_blank_status() {
        let merged = merge([
            entry("transaction:t", Category::PurchaseInvoice, "PUR-7", dec!(1500.00), "-"),
            entry("purchase:p", Category::PurchaseInvoice, "PUR-7 ", dec!(1500), "unpaid"),
        ]);
        assert_eq!(merged.entries.len(), 1);
        assert_eq!(merged.duplicates, 1);
        assert_eq!(merged.entries[0].status, "unpaid");
        assert_eq!(merged.entries[0].id, "purchase:p");
    }

    #[test]
    fn test_first_status_bearing_copy_is_kept() {
        let merged = merge([
            entry("a", Category::SalesInvoice, "INV-1", dec!(10), "cash"),
            entry("b", Category::SalesInvoice, "INV-1", dec!(10), "-"),
            entry("c", Category::SalesInvoice, "INV-1", dec!(10), "unpaid"),
        ]);
        assert_eq!(merged.entries.len(), 1);
        assert_eq!(merged.entries[0].id, "a");
        assert_eq!(merged.duplicates, 2);
    }

    #[test]
    fn test_replacement_keeps_position() {
        let merged = merge([
            entry("a", Category::YouGave, "rent", dec!(5), "-"),
            entry("b", Category::YouGot, "", dec!(7), "-"),
            entry("c", Category::YouGave, "rent", dec!(5), "Payment"),
        ]);
        let ids: Vec<_> = merged.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["c", "b"]);
    }

    #[test]
    fn test_distinct_keys_survive() {
        let merged = merge([
            entry("a", Category::SalesInvoice, "INV-1", dec!(10), "-"),
            entry("b", Category::SalesInvoice, "INV-1", dec!(10.01), "-"),
            entry("c", Category::SalesReturn, "INV-1", dec!(10), "-"),
            entry("d", Category::SalesInvoice, "INV-2", dec!(10), "-"),
        ]);
        assert_eq!(merged.entries.len(), 4);
        assert_eq!(merged.duplicates, 0);
    }

    #[test]
    fn test_coincidental_collision_drops_distinct_event() {
        // Two genuine returns of the same value with no reference collapse
        // into one row.
        let merged = merge([
            entry("salereturn:r1", Category::SalesReturn, "", dec!(500), "-"),
            entry("salereturn:r2", Category::SalesReturn, "", dec!(500), "-"),
        ]);
        assert_eq!(merged.entries.len(), 1);
        assert_eq!(merged.entries[0].id, "salereturn:r1");
        assert_eq!(merged.duplicates, 1);
    }
}
