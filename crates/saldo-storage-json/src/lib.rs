//! saldo-storage-json
//!
//! Filesystem-backed JSON persistence for the ledger. Writes go through a
//! temp file and rename, so a crash mid-save never leaves a torn ledger.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use saldo_core::{CoreError, LedgerStore};
use saldo_domain::Ledger;

pub const LEDGER_FILE_NAME: &str = "ledger.json";
const TMP_SUFFIX: &str = "tmp";

/// Stores the ledger as a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    ledger_path: PathBuf,
}

impl JsonLedgerStore {
    pub fn new(ledger_path: PathBuf) -> Self {
        Self { ledger_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(LEDGER_FILE_NAME)))
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }
}

impl LedgerStore for JsonLedgerStore {
    /// Loads the stored ledger; a missing file yields an empty one.
    fn load(&self) -> Result<Ledger, CoreError> {
        if !self.ledger_path.exists() {
            return Ok(Ledger::new());
        }
        let data = fs::read_to_string(&self.ledger_path)?;
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
    }

    fn save(&self, ledger: &Ledger) -> Result<(), CoreError> {
        if let Some(parent) = self.ledger_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(ledger)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.ledger_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.ledger_path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
