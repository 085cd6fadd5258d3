use crate::args::ViewArgs;
use crate::commands::{load, Out};
use crate::model::{AccountRecord, Amount};
use crate::render::{statement_table, DATE_FORMAT};
use crate::storage::Storage;
use crate::Result;
use anyhow::{ensure, Context};
use chrono::{Datelike, Days, Months, NaiveDate};

/// Shows the statement for the window selected by `args`.
///
/// With `--start`/`--end` the window is that range. Otherwise it is a whole calendar month, where
/// a missing month or year is taken from `today`.
pub async fn view(
    storage: &dyn Storage,
    args: ViewArgs,
    today: NaiveDate,
) -> Result<Out<Vec<AccountRecord>>> {
    let (start, end) = match args.selected_range() {
        Some((start, end)) => {
            ensure!(
                start <= end,
                "The start date {} is after the end date {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            );
            (start, end)
        }
        None => month_window(
            args.selected_year().unwrap_or(today.year()),
            args.selected_month().unwrap_or(today.month()),
        )?,
    };

    let account = load(storage).await?;
    let opening = account.total_before(start)?;
    let records = account.view(start, end)?;

    let heading = format!(
        "{} - {}, carried in {}",
        start.format(DATE_FORMAT),
        end.format(DATE_FORMAT),
        Amount::from(opening)
    );
    let message = if records.is_empty() {
        format!("{heading}\nNo transactions in this period")
    } else {
        format!("{heading}\n\n{}", statement_table().render(&records))
    };
    Ok(Out::new(message, records))
}

/// The first and last day of `month` in `year`.
pub fn month_window(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("{year}-{month:02} is not a valid month"))?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .with_context(|| format!("{year}-{month:02} is out of range"))?;
    Ok((start, end))
}
