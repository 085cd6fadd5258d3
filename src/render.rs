//! Plain-text tables for the terminal.
//!
//! A [`Table`] is a list of typed [`Column`]s. Each column pulls its cell text out of a record with
//! a closure, so the set of columns is checked at compile time. A table may also carry a row
//! styler that colors each padded cell based on the record it came from.

use crate::model::{AccountRecord, Amount, Transaction};
use colored::Colorize;
use std::fmt::{Debug, Formatter};

/// The date format used in every table.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

const GAP: &str = "  ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// What a column closure gets to look at: the record, its position, and every row in the table.
pub struct Cell<'a, T> {
    pub row: usize,
    pub record: &'a T,
    pub rows: &'a [T],
}

impl<'a, T> Cell<'a, T> {
    /// The record on the row above, if any.
    pub fn previous(&self) -> Option<&'a T> {
        self.row.checked_sub(1).and_then(|ix| self.rows.get(ix))
    }
}

type CellFn<T> = Box<dyn Fn(&Cell<'_, T>) -> String>;
type StyleFn<T> = Box<dyn Fn(&T, String) -> String>;

pub struct Column<T> {
    header: String,
    align: Align,
    value: CellFn<T>,
}

impl<T> Column<T> {
    pub fn new<F>(header: impl Into<String>, align: Align, value: F) -> Self
    where
        F: Fn(&Cell<'_, T>) -> String + 'static,
    {
        Self {
            header: header.into(),
            align,
            value: Box::new(value),
        }
    }
}

impl<T> Debug for Column<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("align", &self.align)
            .finish()
    }
}

pub struct Table<T> {
    columns: Vec<Column<T>>,
    style: Option<StyleFn<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            style: None,
        }
    }
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column to the right of the existing ones.
    pub fn column<F>(mut self, header: impl Into<String>, align: Align, value: F) -> Self
    where
        F: Fn(&Cell<'_, T>) -> String + 'static,
    {
        self.columns.push(Column::new(header, align, value));
        self
    }

    /// Sets the styler applied to every padded cell of a row.
    pub fn style<F>(mut self, style: F) -> Self
    where
        F: Fn(&T, String) -> String + 'static,
    {
        self.style = Some(Box::new(style));
        self
    }

    /// Renders a header, a rule, and one line per record.
    pub fn render(&self, rows: &[T]) -> String {
        let cells: Vec<Vec<String>> = rows
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let cell = Cell { row, record, rows };
                self.columns.iter().map(|c| (c.value)(&cell)).collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(ix, column)| {
                cells
                    .iter()
                    .map(|line| width(&line[ix]))
                    .chain(std::iter::once(width(&column.header)))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let mut lines = Vec::with_capacity(rows.len() + 2);
        let header = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(&c.header, *w, c.align))
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(header.trim_end().bold().to_string());
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join(GAP),
        );

        for (record, line) in rows.iter().zip(cells) {
            let rendered = self
                .columns
                .iter()
                .zip(&widths)
                .zip(line)
                .map(|((c, w), text)| {
                    let padded = pad(&text, *w, c.align);
                    match &self.style {
                        Some(style) => style(record, padded),
                        None => padded,
                    }
                })
                .collect::<Vec<_>>()
                .join(GAP);
            lines.push(rendered);
        }

        lines.join("\n")
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{s:<width$}"),
        Align::Right => format!("{s:>width$}"),
    }
}

/// The `list` table: the stored transaction templates with their IDs.
pub fn transactions_table() -> Table<Transaction> {
    Table::<Transaction>::new()
        .column("ID", Align::Right, |c| c.row.to_string())
        .column("Date", Align::Left, |c| {
            c.record.date().format(DATE_FORMAT).to_string()
        })
        .column("Memo", Align::Left, |c| {
            c.record.memo().unwrap_or_default().to_string()
        })
        .column("Amount", Align::Right, |c| {
            Amount::from(c.record.amount()).to_string()
        })
        .column("Trigger", Align::Left, |c| c.record.trigger().to_string())
}

/// The `view` table: a statement with running totals.
///
/// The date is only printed on the first record of each day. Inflows are green and records that
/// leave the balance negative are red.
pub fn statement_table() -> Table<AccountRecord> {
    Table::<AccountRecord>::new()
        .column("Date", Align::Left, |c| {
            let date = c.record.transaction().date();
            match c.previous() {
                Some(prev) if prev.transaction().date() == date => String::new(),
                _ => date.format(DATE_FORMAT).to_string(),
            }
        })
        .column("Memo", Align::Right, |c| {
            c.record
                .transaction()
                .memo()
                .unwrap_or_default()
                .to_string()
        })
        .column("Amount", Align::Right, |c| {
            Amount::from(c.record.transaction().amount()).to_string()
        })
        .column("Total", Align::Right, |c| {
            Amount::from(c.record.total()).to_string()
        })
        .style(|record, cell| {
            if Amount::from(record.transaction().amount()).is_positive() {
                cell.bright_green().to_string()
            } else if Amount::from(record.total()).is_negative() {
                cell.bright_red().to_string()
            } else {
                cell
            }
        })
}
