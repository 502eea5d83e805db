use saldo_config::{BankingConfig, ConfigManager};
use tempfile::TempDir;

#[test]
fn load_returns_defaults_when_file_is_missing() {
    let dir = TempDir::new().expect("temp dir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let config = manager.load().expect("load succeeds");
    assert!(!config.has_credentials());
    assert!(config.linked_accounts.is_empty());
    assert!(config.requisitions.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().expect("temp dir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut config = BankingConfig::default();
    config.set_credentials("secret-id", "secret-key");
    manager.save(&config).expect("save succeeds");

    let reloaded = manager.load().expect("load succeeds");
    assert!(reloaded.has_credentials());
    assert_eq!(reloaded.secret_id, "secret-id");
    assert_eq!(reloaded.secret_key, "secret-key");
}

#[test]
fn file_uses_camel_case_keys() {
    let dir = TempDir::new().expect("temp dir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut config = BankingConfig::default();
    config.set_credentials("secret-id", "secret-key");
    manager.save(&config).expect("save succeeds");

    let raw = std::fs::read_to_string(manager.config_path()).expect("file exists");
    assert!(raw.contains("\"secretId\""));
    assert!(raw.contains("\"secretKey\""));
    assert!(raw.contains("\"linkedAccounts\""));
    assert!(raw.contains("\"requisitions\""));
}

#[test]
fn save_leaves_no_temporary_file_behind() {
    let dir = TempDir::new().expect("temp dir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    manager.save(&BankingConfig::default()).expect("save succeeds");

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
