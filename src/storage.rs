//! Persistence of the ledger.
//!
//! The ledger file is a JSON document of the form:
//!
//! ```json
//! {
//!   "transactions": [
//!     { "memo": "rent", "amount": -1200.0, "date": "2024-01-01", "trigger": "MONTHLY" },
//!     { "amount": 40.0, "date": "2024-01-20", "trigger": "ONCE" }
//!   ]
//! }
//! ```
//!
//! Loading is lenient about individual records: a memo that is not a string is dropped, a
//! missing or unknown trigger becomes `ONCE`, and a record without a readable amount or date is
//! skipped with a warning rather than failing the whole load.

use crate::model::{Account, Amount, Transaction, Trigger};
use crate::{utils, Result};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Somewhere an `Account` can be loaded from and saved back to.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Loads the account. Storage that has never been written yields an empty account.
    async fn load(&self) -> Result<Account>;

    /// Replaces whatever is stored with `account`.
    async fn save(&self, account: &Account) -> Result<()>;
}

/// A ledger kept in a single JSON file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The sibling file that a save is written to before it is moved over `path`.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl Storage for JsonFile {
    async fn load(&self) -> Result<Account> {
        if !utils::exists(&self.path).await? {
            debug!(
                "No ledger at {}, starting with an empty one",
                self.path.display()
            );
            return Ok(Account::default());
        }
        let content = utils::read(&self.path).await?;
        let account = parse(&content)
            .with_context(|| format!("Failed to parse ledger file at {}", self.path.display()))?;
        debug!(
            "Loaded {} transactions from {}",
            account.len(),
            self.path.display()
        );
        Ok(account)
    }

    async fn save(&self, account: &Account) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            utils::make_dir(parent).await?;
        }
        let data = to_json(account)?;
        let staging = self.staging_path();
        utils::write(&staging, data).await?;
        utils::rename(&staging, &self.path).await?;
        debug!(
            "Saved {} transactions to {}",
            account.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// A ledger held in memory, for tests and for embedding without a file.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    account: Mutex<Account>,
}

impl MemoryStorage {
    pub fn new(account: Account) -> Self {
        Self {
            account: Mutex::new(account),
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load(&self) -> Result<Account> {
        let guard = self
            .account
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory storage lock poisoned"))?;
        Ok(guard.clone())
    }

    async fn save(&self, account: &Account) -> Result<()> {
        let mut guard = self
            .account
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory storage lock poisoned"))?;
        *guard = account.clone();
        Ok(())
    }
}

#[derive(Deserialize)]
struct LedgerDocument {
    #[serde(default)]
    transactions: Vec<Value>,
}

#[derive(Serialize)]
struct LedgerDocumentRef<'a> {
    transactions: &'a [Transaction],
}

/// Parses a ledger document, skipping records that cannot be read.
pub(crate) fn parse(json: &str) -> Result<Account> {
    let document: LedgerDocument = serde_json::from_str(json)?;
    let transactions = document
        .transactions
        .iter()
        .enumerate()
        .filter_map(|(ix, value)| {
            let record = read_record(value);
            if record.is_none() {
                warn!("Skipping ledger record {ix}: it has no readable amount and date: {value}");
            }
            record
        })
        .collect::<Vec<_>>();
    Ok(Account::new(transactions))
}

/// Serializes an account into a ledger document.
pub(crate) fn to_json(account: &Account) -> Result<String> {
    let document = LedgerDocumentRef {
        transactions: account.transactions(),
    };
    serde_json::to_string_pretty(&document).context("Unable to serialize the ledger")
}

fn read_record(value: &Value) -> Option<Transaction> {
    let record = value.as_object()?;
    let memo = record.get("memo").and_then(Value::as_str);
    let amount = record.get("amount").and_then(read_amount)?;
    let date = record.get("date").and_then(read_date)?;
    let trigger = record
        .get("trigger")
        .and_then(Value::as_str)
        .map(Trigger::parse_lenient)
        .unwrap_or_default();
    Some(Transaction::new(memo, amount, date, trigger))
}

fn read_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let s = n.to_string();
            Decimal::from_str(&s)
                .or_else(|_| Decimal::from_scientific(&s))
                .ok()
        }
        Value::String(s) => Amount::from_str(s).ok().map(|a| a.value()),
        _ => None,
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, of which the local calendar date is kept.
pub(crate) fn read_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Local).date_naive())
    })
}
