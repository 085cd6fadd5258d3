//! These structs provide the CLI interface for the cashii CLI.

use crate::config::default_ledger_path;
use crate::model::{Amount, Trigger};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// cashii: A CLI budgeting app.
///
/// Keep a list of one-time and recurring transactions (paychecks, rent, subscriptions) and see
/// the running balance they produce over any month or date range.
#[derive(Debug, Parser, Clone)]
#[command(name = "cashii", version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add money coming in, e.g. `cashii get paycheck 2500 01/05/2024 MONTHLY`.
    Get(TransferArgs),
    /// Add money going out, e.g. `cashii send rent 1200 01/01/2024 MONTHLY`.
    Send(TransferArgs),
    /// Remove a transaction by its ID (see `cashii list`).
    #[command(alias = "rm")]
    Remove(RemoveArgs),
    /// List the stored transactions with their IDs.
    List,
    /// Show the statement for a month (default: the current one) or a date range.
    View(ViewArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, global = true, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The ledger file. Defaults to ~/.cashii.json
    #[arg(long, global = true, env = "CASHII_LEDGER", default_value_t = default_ledger())]
    ledger: DisplayPath,

    /// Do not color the output. Setting NO_COLOR has the same effect.
    #[arg(long, global = true)]
    no_color: bool,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn ledger(&self) -> &DisplayPath {
        &self.ledger
    }

    pub fn no_color(&self) -> bool {
        self.no_color
    }
}

/// Args for the `cashii get` and `cashii send` commands.
#[derive(Debug, Parser, Clone)]
pub struct TransferArgs {
    /// What to call the transaction.
    memo: String,

    /// The amount to transfer, e.g. 12.50 or $1,200.00
    #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
    amount: Decimal,

    /// The date of the first transfer (MM/DD/YYYY or YYYY-MM-DD).
    #[arg(value_parser = parse_date)]
    date: NaiveDate,

    /// How the transfer repeats: ONCE, DAILY, WEEKLY, MONTHLY or YEARLY.
    #[arg(value_parser = parse_trigger, default_value = "ONCE")]
    trigger: Trigger,
}

impl TransferArgs {
    pub fn new(memo: impl Into<String>, amount: Decimal, date: NaiveDate, trigger: Trigger) -> Self {
        Self {
            memo: memo.into(),
            amount,
            date,
            trigger,
        }
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }
}

/// Args for the `cashii remove` command.
#[derive(Debug, Parser, Clone)]
pub struct RemoveArgs {
    /// The transaction ID (see list).
    id: usize,
}

impl RemoveArgs {
    pub fn new(id: usize) -> Self {
        Self { id }
    }

    pub fn id(&self) -> usize {
        self.id
    }
}

/// Args for the `cashii view` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ViewArgs {
    /// The month in view (1-12). Defaults to the current month.
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// The year in view (YYYY). Defaults to the current year.
    #[arg(long, short, value_parser = clap::value_parser!(i32).range(1..=9999))]
    year: Option<i32>,

    /// The first day of a custom range (MM/DD/YYYY or YYYY-MM-DD). Requires --end.
    #[arg(long, value_parser = parse_date, requires = "end", conflicts_with_all = ["month", "year"])]
    start: Option<NaiveDate>,

    /// The last day of a custom range, inclusive. Requires --start.
    #[arg(long, value_parser = parse_date, requires = "start")]
    end: Option<NaiveDate>,
}

impl ViewArgs {
    pub fn month(month: u32, year: i32) -> Self {
        Self {
            month: Some(month),
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn selected_month(&self) -> Option<u32> {
        self.month
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.year
    }

    /// The explicit `--start`/`--end` range, when one was given.
    pub fn selected_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }
}

/// Parses a user-typed amount. The sign is applied by the command, so `send rent 1200` and
/// `get pay 1200` both take a plain positive number.
pub fn parse_amount(s: &str) -> Result<Decimal, String> {
    Amount::from_str(s)
        .map(|a| a.value())
        .map_err(|e| e.to_string())
}

/// Parses `MM/DD/YYYY` or `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .map_err(|_| format!("'{s}' is an invalid transaction date, expected MM/DD/YYYY"))
}

/// Parses a trigger name in any letter case.
pub fn parse_trigger(s: &str) -> Result<Trigger, String> {
    Trigger::from_str(&s.trim().to_uppercase()).map_err(|_| {
        let names: Vec<String> = Trigger::ALL.iter().map(Trigger::to_string).collect();
        format!("'{s}' is not a trigger, expected one of {}", names.join(", "))
    })
}

fn default_ledger() -> DisplayPath {
    default_ledger_path().into()
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
