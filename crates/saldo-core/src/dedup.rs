//! Filters out bank transactions that are already recorded in the ledger.
//!
//! Two guards: the provider-assigned `bank_ref`, and a content-based
//! composite key catching movements the user already typed in by hand
//! before bank sync was connected.

use std::collections::HashSet;

use saldo_domain::Transaction;

/// Truncation length for the content-based fallback key. A heuristic:
/// distinct same-day, same-amount transactions with similar short titles
/// can collide.
const TITLE_KEY_LEN: usize = 20;

/// Returns the candidates not yet present in the ledger, in input order.
///
/// Pure: the same inputs always produce the same partition.
pub fn dedupe(candidates: Vec<Transaction>, existing: &[Transaction]) -> Vec<Transaction> {
    let existing_refs: HashSet<&str> = existing
        .iter()
        .filter_map(|tx| tx.bank_ref.as_deref())
        .collect();
    let existing_keys: HashSet<String> = existing.iter().map(composite_key).collect();

    candidates
        .into_iter()
        .filter(|candidate| {
            if let Some(bank_ref) = candidate.bank_ref.as_deref() {
                if existing_refs.contains(bank_ref) {
                    return false;
                }
            }
            !existing_keys.contains(&composite_key(candidate))
        })
        .collect()
}

/// `date|amount|title-prefix`, with the title lower-cased and truncated to
/// its first characters (not bytes).
pub fn composite_key(transaction: &Transaction) -> String {
    let title: String = transaction
        .title
        .to_lowercase()
        .chars()
        .take(TITLE_KEY_LEN)
        .collect();
    format!("{}|{}|{}", transaction.date, transaction.amount, title)
}
