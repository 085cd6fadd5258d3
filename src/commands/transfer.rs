//! The `get` and `send` commands.

use crate::args::TransferArgs;
use crate::commands::{load, Out};
use crate::model::{Amount, Transaction};
use crate::render::DATE_FORMAT;
use crate::storage::Storage;
use crate::Result;
use rust_decimal::Decimal;
use tracing::debug;

/// Adds money coming in: the amount is stored as given.
pub async fn get(storage: &dyn Storage, args: TransferArgs) -> Result<Out<Transaction>> {
    transfer(storage, args, Decimal::ONE).await
}

/// Adds money going out: the amount is stored negated.
pub async fn send(storage: &dyn Storage, args: TransferArgs) -> Result<Out<Transaction>> {
    transfer(storage, args, Decimal::NEGATIVE_ONE).await
}

async fn transfer(
    storage: &dyn Storage,
    args: TransferArgs,
    scalar: Decimal,
) -> Result<Out<Transaction>> {
    let mut account = load(storage).await?;
    let memo = Some(args.memo().trim()).filter(|m| !m.is_empty());
    let transaction = Transaction::new(memo, args.amount() * scalar, args.date(), args.trigger());
    debug!("Adding {transaction:?}");
    account.add(transaction.clone());
    storage.save(&account).await?;

    let message = format!(
        "Added {} {} starting {}",
        transaction.trigger(),
        Amount::from(transaction.amount()),
        transaction.date().format(DATE_FORMAT)
    );
    Ok(Out::new(message, transaction))
}
