use chrono::NaiveDate;
use saldo_core::LedgerStore;
use saldo_domain::{Account, AccountKind, Ledger, Transaction};
use saldo_storage_json::JsonLedgerStore;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn missing_file_loads_an_empty_ledger() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonLedgerStore::with_base_dir(dir.path().to_path_buf()).expect("store");

    let ledger = store.load().expect("load succeeds");
    assert!(ledger.accounts.is_empty());
    assert!(ledger.transactions.is_empty());
}

#[test]
fn save_then_load_round_trips_accounts_and_transactions() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonLedgerStore::with_base_dir(dir.path().to_path_buf()).expect("store");

    let mut ledger = Ledger::new();
    let account_id = ledger.add_account(Account::new("Checking", AccountKind::Bank));
    ledger.post_transaction(
        Transaction::new("Esselunga Milano", date(2026, 3, 1), -45.90, "Spesa")
            .with_account(account_id)
            .with_bank_ref("TX123"),
    );
    store.save(&ledger).expect("save succeeds");

    let reloaded = store.load().expect("load succeeds");
    assert_eq!(reloaded.accounts.len(), 1);
    assert_eq!(reloaded.transactions.len(), 1);
    assert_eq!(reloaded.transactions[0].bank_ref.as_deref(), Some("TX123"));
    let account = reloaded.account(account_id).expect("account survives");
    assert!((account.balance + 45.90).abs() < 1e-9);
}

#[test]
fn save_replaces_previous_contents_atomically() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonLedgerStore::with_base_dir(dir.path().to_path_buf()).expect("store");

    let mut ledger = Ledger::new();
    ledger.add_account(Account::new("Checking", AccountKind::Bank));
    store.save(&ledger).expect("first save");

    ledger.add_account(Account::new("Savings", AccountKind::Bank));
    store.save(&ledger).expect("second save");

    let reloaded = store.load().expect("load succeeds");
    assert_eq!(reloaded.accounts.len(), 2);

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext == "tmp")
                .unwrap_or(false)
        })
        .collect();
    assert!(leftovers.is_empty());
}
