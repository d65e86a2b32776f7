//! Invoice/return number inference from free-text descriptions.

use crate::models::Category;
use once_cell::sync::Lazy;
use regex::Regex;

static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(INV|PUR|SR|PR)[ _-]?\d{1,6}\b").expect("reference pattern is valid")
});

/// Category and token recovered from a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredReference {
    pub category: Category,
    pub reference: String,
}

/// Find the first invoice-like token (`INV-12`, `pur 7`, `SR_003`, `PR003`)
/// in `text`. The token is returned exactly as written.
pub fn infer_reference(text: &str) -> Option<InferredReference> {
    let captures = REFERENCE_PATTERN.captures(text)?;
    let token = captures.get(0)?;
    let prefix = captures.get(1)?.as_str().to_ascii_uppercase();

    let category = match prefix.as_str() {
        "INV" => Category::SalesInvoice,
        "PUR" => Category::PurchaseInvoice,
        "SR" => Category::SalesReturn,
        "PR" => Category::PurchaseReturn,
        _ => return None,
    };

    Some(InferredReference {
        category,
        reference: token.as_str().to_string(),
    })
}
