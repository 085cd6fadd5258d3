//! Command handlers for the cashii CLI.
//!
//! Every handler loads the account from a [`Storage`], does its work, saves if anything changed,
//! and returns an [`Out`] for the caller to print.

mod list;
mod remove;
mod transfer;
mod view;

use crate::model::Account;
use crate::storage::Storage;
use crate::Result;
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

pub use list::list;
pub use remove::remove;
pub use transfer::{get, send};
pub use view::{month_window, view};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// The text printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to stdout and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        println!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Loads the account and puts it in statement order, which is the order IDs refer to.
async fn load(storage: &dyn Storage) -> Result<Account> {
    let mut account = storage.load().await?;
    account.sort();
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Transaction, Trigger};
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_out_message() {
        let out: Out<()> = "done".into();
        assert_eq!(out.message(), "done");
        assert!(out.structure().is_none());

        let out = Out::new("counted", 3u32);
        assert_eq!(out.structure(), Some(&3));
    }

    #[tokio::test]
    async fn test_load_sorts() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let storage = MemoryStorage::new(Account::new(vec![
            Transaction::new(Some("late"), Decimal::ONE, day(9), Trigger::Once),
            Transaction::new(Some("out"), Decimal::NEGATIVE_ONE, day(2), Trigger::Once),
            Transaction::new(Some("in"), Decimal::TEN, day(2), Trigger::Once),
        ]));
        let account = load(&storage).await.unwrap();
        let memos: Vec<&str> = account
            .transactions()
            .iter()
            .filter_map(Transaction::memo)
            .collect();
        assert_eq!(memos, vec!["in", "out", "late"]);
    }
}
