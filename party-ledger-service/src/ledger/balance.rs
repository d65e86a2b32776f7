//! Running balance of a party.
//!
//! Positive balances are owed to the business, negative balances are owed by
//! it. Only manual transactions move the balance; invoices reach it through
//! the transactions raised when they are settled.

use crate::models::{LedgerTransaction, TransactionType};
use rust_decimal::Decimal;

/// Balance movement of one transaction.
pub fn signed_delta(txn_type: TransactionType, amount: Decimal) -> Decimal {
    match txn_type {
        TransactionType::YouGot => amount,
        TransactionType::YouGave => -amount,
    }
}

/// Opening balance plus every live transaction. Deleted rows are skipped.
pub fn fold_balance<'a, I>(opening_balance: Decimal, transactions: I) -> Decimal
where
    I: IntoIterator<Item = &'a LedgerTransaction>,
{
    transactions
        .into_iter()
        .filter(|t| !t.is_deleted)
        .fold(opening_balance, |acc, t| acc + signed_delta(t.txn_type, t.amount))
}

/// Replace the opening-balance term inside a cached balance, keeping the
/// accumulated transaction deltas.
pub fn rebase_opening_balance(balance: Decimal, old_opening: Decimal, new_opening: Decimal) -> Decimal {
    balance - old_opening + new_opening
}
