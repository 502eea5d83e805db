//! Converts raw aggregator records into canonical ledger transactions.
//!
//! Handles title cleanup (banking boilerplate, long numeric ids, embedded
//! dates, masked card numbers), date/amount extraction, and the stable
//! `bank_ref` used downstream for deduplication.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use saldo_banking::RawTransaction;
use saldo_domain::Transaction;
use uuid::Uuid;

use crate::categorizer::Categorizer;

/// Title used when nothing recognizable survives cleanup.
pub const FALLBACK_TITLE: &str = "Unknown Transaction";

/// Description used when the provider sends no text at all.
const FALLBACK_DESCRIPTION: &str = "Movimento";

static BOILERPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:SDD\s*CORE|SEPA|POS|PAGAMENTO|BONIFICO|ADDEBITO|ACCREDITO|GIROCONTO)\b")
        .unwrap()
});
static REFERENCE_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:DISP\.\s*N\.\s*|RIF\.\s*|CRO\s*|VS\.\s*)").unwrap());
static LONG_DIGIT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{8,}").unwrap());
static DATE_PATTERNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}|\d{2}\.\d{2}\.\d{4}").unwrap());
static MASKED_CARDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*{4}\d{4}").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Cleans a raw bank transaction description into a display title.
///
/// Re-cleaning an already clean title is a no-op.
pub fn clean_title(raw: &str) -> String {
    let mut clean = BOILERPLATE.replace_all(raw, "").into_owned();
    clean = REFERENCE_MARKERS.replace_all(&clean, "").into_owned();
    clean = LONG_DIGIT_RUNS.replace_all(&clean, "").into_owned();
    clean = DATE_PATTERNS.replace_all(&clean, "").into_owned();
    clean = MASKED_CARDS.replace_all(&clean, "").into_owned();
    let collapsed = WHITESPACE.replace_all(&clean, " ");
    let trimmed = collapsed.trim_matches(|c: char| c.is_whitespace() || c == '-' || c == '/');

    if trimmed.is_empty() {
        return FALLBACK_TITLE.to_string();
    }

    trimmed
        .split(' ')
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Short words stay lowercase so articles and prepositions are not mangled.
fn title_case_word(word: &str) -> String {
    if word.chars().count() <= 2 {
        return word.to_lowercase();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Maps a batch of raw provider records into canonical transactions tagged
/// as bank imports.
pub fn normalize_batch(
    batch: &[RawTransaction],
    account_label: &str,
    account_id: Option<Uuid>,
    categorizer: &Categorizer,
) -> Vec<Transaction> {
    tracing::debug!(
        account = %account_label,
        count = batch.len(),
        "normalizing raw transaction batch"
    );
    batch
        .iter()
        .map(|raw| normalize(raw, account_id, categorizer))
        .collect()
}

fn normalize(raw: &RawTransaction, account_id: Option<Uuid>, categorizer: &Categorizer) -> Transaction {
    let amount = raw
        .transaction_amount
        .as_ref()
        .and_then(|value| value.amount.parse::<f64>().ok())
        .unwrap_or(0.0);
    let description = description_of(raw);
    let title = clean_title(&description);
    // Categories match against the raw text: cleanup may strip the very
    // token a keyword would hit.
    let category = categorizer.categorize(&description).to_string();
    let date = raw
        .booking_date
        .or(raw.value_date)
        .unwrap_or_else(|| Utc::now().date_naive());
    let bank_ref = raw
        .transaction_id
        .clone()
        .or_else(|| raw.internal_transaction_id.clone())
        .unwrap_or_else(synthetic_bank_ref);

    let mut transaction = Transaction::new(title, date, amount, category).with_bank_ref(bank_ref);
    transaction.account_id = account_id;
    transaction
}

/// The `local-` prefix keeps generated refs distinguishable from anything
/// the provider could assign.
fn synthetic_bank_ref() -> String {
    format!("local-{}", Uuid::new_v4().simple())
}

fn description_of(raw: &RawTransaction) -> String {
    if let Some(text) = non_empty(raw.remittance_information_unstructured.as_deref()) {
        return text;
    }
    if let Some(lines) = raw.remittance_information_unstructured_array.as_ref() {
        let joined = lines.join(" ");
        if !joined.trim().is_empty() {
            return joined;
        }
    }
    if let Some(name) = non_empty(raw.creditor_name.as_deref()) {
        return name;
    }
    if let Some(name) = non_empty(raw.debtor_name.as_deref()) {
        return name;
    }
    if let Some(info) = non_empty(raw.additional_information.as_deref()) {
        return info;
    }
    FALLBACK_DESCRIPTION.to_string()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
