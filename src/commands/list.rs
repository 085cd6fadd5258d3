use crate::commands::{load, Out};
use crate::model::Transaction;
use crate::render::transactions_table;
use crate::storage::Storage;
use crate::Result;

/// Lists the stored transactions in ID order.
pub async fn list(storage: &dyn Storage) -> Result<Out<Vec<Transaction>>> {
    let account = load(storage).await?;
    if account.is_empty() {
        return Ok(Out::new(
            "There are no transactions yet, add one with `cashii get` or `cashii send`",
            Vec::new(),
        ));
    }
    let table = transactions_table().render(account.transactions());
    Ok(Out::new(table, account.transactions().to_vec()))
}
