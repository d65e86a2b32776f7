//! Display status for ledger rows.

use crate::models::{LedgerTransaction, PurchaseReturn, SaleReturn, SourceDocument};
use rust_decimal::Decimal;

/// Placeholder shown when nothing is known about a row's settlement.
pub const NO_STATUS: &str = "-";

pub const PAYMENT_STATUS: &str = "Payment";
pub const REFUND_STATUS: &str = "Refund";
pub const UNPAID_STATUS: &str = "unpaid";

fn explicit(status: Option<&str>) -> Option<&str> {
    status.map(str::trim).filter(|s| !s.is_empty())
}

fn is_positive(amount: Option<Decimal>) -> bool {
    amount.is_some_and(|a| a > Decimal::ZERO)
}

/// Resolve the status of an invoice or return. Always yields a value.
pub fn document_status(doc: &SourceDocument) -> String {
    match doc {
        SourceDocument::Sale(d) => invoice_status(d.payment_status.as_deref()),
        SourceDocument::Purchase(d) => invoice_status(d.payment_status.as_deref()),
        SourceDocument::NewSale(d) => invoice_status(d.payment_status.as_deref()),
        SourceDocument::NewPurchase(d) => invoice_status(d.payment_status.as_deref()),
        SourceDocument::SaleReturn(d) => sale_return_status(d),
        SourceDocument::PurchaseReturn(d) => purchase_return_status(d),
    }
}

fn invoice_status(status: Option<&str>) -> String {
    explicit(status)
        .map(str::to_lowercase)
        .unwrap_or_else(|| NO_STATUS.to_string())
}

fn sale_return_status(ret: &SaleReturn) -> String {
    if let Some(status) = explicit(ret.refund_status.as_deref()) {
        return status.to_string();
    }
    if is_positive(ret.amount_refunded) {
        REFUND_STATUS.to_string()
    } else if is_positive(ret.balance_amount) {
        UNPAID_STATUS.to_string()
    } else {
        NO_STATUS.to_string()
    }
}

fn purchase_return_status(ret: &PurchaseReturn) -> String {
    if let Some(status) = explicit(ret.payment_status.as_deref()) {
        return status.to_string();
    }
    if is_positive(ret.amount_paid) {
        PAYMENT_STATUS.to_string()
    } else if is_positive(ret.balance_amount) {
        UNPAID_STATUS.to_string()
    } else {
        NO_STATUS.to_string()
    }
}

/// Own status of a manual transaction, before any linked-document override.
pub fn transaction_status(txn: &LedgerTransaction) -> String {
    explicit(txn.status.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| NO_STATUS.to_string())
}
