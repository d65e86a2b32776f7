//! Newest-first ordering of ledger rows.

use crate::models::LedgerEntry;

/// Sort by effective date, newest first. Equal dates keep their input order.
pub fn sequence(entries: &mut [LedgerEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, SourceKind};
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn entry(id: &str, date: DateTime<Utc>) -> LedgerEntry {
        LedgerEntry {
            id: id.to_string(),
            amount: Decimal::ONE,
            category: Category::YouGot,
            reference: String::new(),
            date,
            status: "-".to_string(),
            source_kind: SourceKind::Transaction,
            source_id: id.to_string(),
            doc_ref: None,
        }
    }

    #[test]
    fn test_newest_first_with_stable_ties() {
        let jan = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        let mut entries = vec![
            entry("old", jan),
            entry("tie-1", feb),
            entry("undated", DateTime::UNIX_EPOCH),
            entry("tie-2", feb),
        ];
        sequence(&mut entries);

        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["tie-1", "tie-2", "old", "undated"]);
        assert!(entries.windows(2).all(|w| w[0].date >= w[1].date));
    }
}
