//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Account, Transaction, Trigger};
use crate::storage::{JsonFile, Storage};
use crate::Config;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Test environment with a ledger file in a temporary directory.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment whose ledger file does not exist yet.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(temp_dir.path().join("ledger.json"));
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Creates a test environment whose ledger holds [`sample_account`].
    pub async fn with_sample() -> Self {
        let env = Self::new().await;
        env.storage().save(&sample_account()).await.unwrap();
        env
    }

    pub fn config(&self) -> Config {
        self.config.clone()
    }

    pub fn storage(&self) -> JsonFile {
        self.config.storage()
    }
}

/// A small household ledger, deliberately not in date order.
pub fn sample_account() -> Account {
    let ymd = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    Account::new(vec![
        Transaction::new(
            Some("groceries"),
            Decimal::new(-8550, 2),
            ymd(2024, 1, 6),
            Trigger::Weekly,
        ),
        Transaction::new(
            Some("rent"),
            Decimal::from(-1200),
            ymd(2023, 11, 1),
            Trigger::Monthly,
        ),
        Transaction::new(
            Some("salary"),
            Decimal::from(2500),
            ymd(2023, 11, 3),
            Trigger::Monthly,
        ),
        Transaction::new(
            Some("birthday"),
            Decimal::from(40),
            ymd(2024, 2, 14),
            Trigger::Once,
        ),
    ])
}
