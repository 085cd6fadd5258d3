use crate::model::{compare, Transaction};
use crate::Result;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::trace;

/// One line of a statement: a dated occurrence and the balance immediately after applying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRecord {
    transaction: Transaction,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    total: Decimal,
}

impl AccountRecord {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// The running balance after this record.
    pub fn total(&self) -> Decimal {
        self.total
    }
}

/// The transaction templates that make up a ledger, in list order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Account {
    transactions: Vec<Transaction>,
}

impl Account {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Appends a transaction to the end of the list.
    pub fn add(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Removes and returns the transaction at `index`. An out-of-range index is an error and
    /// leaves the account unchanged.
    pub fn remove(&mut self, index: usize) -> Result<Transaction> {
        if index >= self.transactions.len() {
            bail!(
                "There is no transaction with ID {index}, the ledger has {} transaction{}",
                self.transactions.len(),
                if self.transactions.len() == 1 { "" } else { "s" }
            )
        }
        Ok(self.transactions.remove(index))
    }

    /// Stable sort of the templates by [`compare`].
    pub fn sort(&mut self) {
        self.transactions.sort_by(compare);
    }

    /// Builds the statement for `[start, end]`, both ends inclusive.
    ///
    /// Records are ordered by [`compare`] and the running total starts from
    /// [`Account::total_before`] `start`, so the last record's total is the balance at the end of
    /// `end`. Fails if the balance leaves the range of `Decimal`.
    pub fn view(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<AccountRecord>> {
        let mut occurrences: Vec<Transaction> = self
            .transactions
            .iter()
            .flat_map(|t| t.expand(start, end))
            .collect();
        occurrences.sort_by(compare);

        let opening = self.total_before(start)?;
        trace!(
            "Statement {start}..={end}: {} occurrences, opening balance {opening}",
            occurrences.len()
        );

        let mut total = opening;
        occurrences
            .into_iter()
            .map(|transaction| {
                total = apply(total, &transaction)?;
                Ok(AccountRecord { transaction, total })
            })
            .collect()
    }

    /// The balance carried into a statement starting on `date`: the sum of every occurrence
    /// strictly before it.
    pub fn total_before(&self, date: NaiveDate) -> Result<Decimal> {
        self.transactions
            .iter()
            .flat_map(|t| t.expand_before(date))
            .try_fold(Decimal::ZERO, |total, t| apply(total, &t))
    }
}

fn apply(total: Decimal, transaction: &Transaction) -> Result<Decimal> {
    total.checked_add(transaction.amount()).with_context(|| {
        format!(
            "The balance is too large to represent after the transaction on {}",
            transaction.date()
        )
    })
}
