//! Runtime configuration.
//!
//! The only setting that reaches the commands is where the ledger lives. It comes from
//! `--ledger`, then `$CASHII_LEDGER`, then defaults to `$HOME/.cashii.json`.

use crate::storage::JsonFile;
use std::path::{Path, PathBuf};
use tracing::error;

/// The default ledger file name, placed in the user's home directory.
pub const LEDGER_JSON: &str = ".cashii.json";

/// The `Config` object is handed to every command. It knows where the ledger is stored and builds
/// the storage provider for it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    ledger_path: PathBuf,
}

impl Config {
    pub fn new(ledger_path: impl Into<PathBuf>) -> Self {
        Self {
            ledger_path: ledger_path.into(),
        }
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    /// The storage provider for the configured ledger.
    pub fn storage(&self) -> JsonFile {
        JsonFile::new(&self.ledger_path)
    }
}

/// `$HOME/.cashii.json`, or `.cashii.json` in the working directory if there is no home.
pub fn default_ledger_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(LEDGER_JSON),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --ledger or CASHII_LEDGER. Falling back to {LEDGER_JSON} in \
                the current directory.",
            );
            PathBuf::from(LEDGER_JSON)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_uses_ledger_path() {
        let config = Config::new("/tmp/somewhere/ledger.json");
        assert_eq!(config.ledger_path(), Path::new("/tmp/somewhere/ledger.json"));
        assert_eq!(config.storage().path(), config.ledger_path());
    }

    #[test]
    fn test_default_ledger_path_file_name() {
        let path = default_ledger_path();
        assert_eq!(path.file_name().unwrap(), LEDGER_JSON);
    }
}
