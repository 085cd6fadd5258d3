//! The recurrence kind of a transaction and the calendar arithmetic behind it.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a transaction repeats. `Once` means it does not repeat.
///
/// Serialized as upper-case strings, e.g. `"MONTHLY"`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trigger {
    #[default]
    Once,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

serde_plain::derive_display_from_serialize!(Trigger);
serde_plain::derive_fromstr_from_deserialize!(Trigger);

impl Trigger {
    /// All triggers, in declaration order.
    pub const ALL: [Trigger; 5] = [
        Trigger::Once,
        Trigger::Daily,
        Trigger::Weekly,
        Trigger::Monthly,
        Trigger::Yearly,
    ];

    /// Parses `s` exactly (case-sensitive), falling back to `Once` for anything unrecognized.
    pub fn parse_lenient(s: &str) -> Self {
        Trigger::from_str(s).unwrap_or_default()
    }

    /// The occurrence that follows `date` in a series with this trigger.
    ///
    /// Each step is taken from the previous occurrence, so a day of month that does not exist in
    /// the next month is clamped and stays clamped: Jan 31 is followed by Feb 29 (in 2024), then
    /// Mar 29.
    ///
    /// Returns `None` for `Once`, and when the next date is beyond what `NaiveDate` can represent.
    pub fn next(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Trigger::Once => None,
            Trigger::Daily => date.checked_add_days(Days::new(1)),
            Trigger::Weekly => date.checked_add_days(Days::new(7)),
            Trigger::Monthly => date.checked_add_months(Months::new(1)),
            Trigger::Yearly => date.checked_add_months(Months::new(12)),
        }
    }

    /// An occurrence of the series anchored at `anchor` from which a scan for the first
    /// occurrence on or after `date` may start. Every occurrence it jumps over is before `date`.
    ///
    /// Day and week steps never clamp, so their series can be jumped into directly. Month and
    /// year series start from the anchor.
    pub fn fast_forward(self, anchor: NaiveDate, date: NaiveDate) -> NaiveDate {
        if date <= anchor {
            return anchor;
        }
        let days = match self {
            Trigger::Daily => (date - anchor).num_days(),
            Trigger::Weekly => (date - anchor).num_days() / 7 * 7,
            Trigger::Once | Trigger::Monthly | Trigger::Yearly => 0,
        };
        u64::try_from(days)
            .ok()
            .and_then(|days| anchor.checked_add_days(Days::new(days)))
            .unwrap_or(anchor)
    }
}
