//! Types that represent the core data model: `Transaction`, its `Trigger`, and the `Account` that
//! turns a set of transactions into a statement.
mod account;
mod amount;
mod transaction;
mod trigger;

pub use account::{Account, AccountRecord};
pub use amount::{Amount, AmountError};
pub use transaction::{compare, Transaction};
pub use trigger::Trigger;
