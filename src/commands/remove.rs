use crate::args::RemoveArgs;
use crate::commands::{load, Out};
use crate::model::{Amount, Transaction};
use crate::storage::Storage;
use crate::Result;

/// Removes the transaction with the given ID, as shown by `list`.
///
/// An unknown ID is an error and nothing is saved.
pub async fn remove(storage: &dyn Storage, args: RemoveArgs) -> Result<Out<Transaction>> {
    let mut account = load(storage).await?;
    let removed = account.remove(args.id())?;
    storage.save(&account).await?;
    let message = format!(
        "Removed transaction {}: {} {}",
        args.id(),
        removed.memo().unwrap_or("(no memo)"),
        Amount::from(removed.amount())
    );
    Ok(Out::new(message, removed))
}
