use crate::model::Trigger;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;

/// A single financial movement, possibly recurring.
///
/// For `Trigger::Once` the `date` is the only occurrence. For recurring triggers it is the first
/// occurrence and fixes the phase of the series. A positive `amount` is an inflow, a negative one
/// an outflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    memo: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    amount: Decimal,
    date: NaiveDate,
    trigger: Trigger,
}

impl Transaction {
    pub fn new(
        memo: Option<impl Into<String>>,
        amount: Decimal,
        date: NaiveDate,
        trigger: Trigger,
    ) -> Self {
        Self {
            memo: memo.map(Into::into),
            amount,
            date,
            trigger,
        }
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
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

    /// Every occurrence dated within `[start, end]`, both ends inclusive, collapsed to `Once`.
    ///
    /// A recurring occurrence landing exactly on `end` is included, the same as a one-time
    /// transaction dated `end`. Returns nothing when `start > end`.
    pub fn expand(&self, start: NaiveDate, end: NaiveDate) -> Vec<Transaction> {
        if start > end {
            return Vec::new();
        }
        self.dates_from(self.trigger.fast_forward(self.date, start))
            .skip_while(|date| *date < start)
            .take_while(|date| *date <= end)
            .map(|date| self.collapse(date))
            .collect()
    }

    /// Every occurrence dated strictly before `date`, collapsed to `Once`.
    ///
    /// Together with [`Transaction::expand`] this partitions the series: an occurrence on `date`
    /// belongs to `expand(date, ..)` and never to `expand_before(date)`.
    pub fn expand_before(&self, date: NaiveDate) -> Vec<Transaction> {
        self.dates_from(self.date)
            .take_while(|occurrence| *occurrence < date)
            .map(|occurrence| self.collapse(occurrence))
            .collect()
    }

    /// A one-time copy of this transaction dated `date`.
    pub fn collapse(&self, date: NaiveDate) -> Transaction {
        Transaction {
            memo: self.memo.clone(),
            amount: self.amount,
            date,
            trigger: Trigger::Once,
        }
    }

    /// Occurrence dates in ascending order, starting with `first`, which must be on the series.
    fn dates_from(&self, first: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        let trigger = self.trigger;
        std::iter::successors(Some(first), move |date| trigger.next(*date))
    }
}

/// Statement order: by date ascending, then by amount descending so that on any given day money
/// comes in before it goes out. Transactions equal in both compare as equal, so a stable sort
/// keeps their relative order.
pub fn compare(a: &Transaction, b: &Transaction) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| b.amount.cmp(&a.amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn txn(amount: &str, date: NaiveDate, trigger: Trigger) -> Transaction {
        Transaction::new(Some("test"), dec(amount), date, trigger)
    }

    fn dates(ts: &[Transaction]) -> Vec<NaiveDate> {
        ts.iter().map(Transaction::date).collect()
    }

    #[test]
    fn test_once_inside_window() {
        let t = txn("100.00", ymd(2024, 1, 5), Trigger::Once);
        let expanded = t.expand(ymd(2024, 1, 1), ymd(2024, 1, 31));
        assert_eq!(expanded, vec![t]);
    }

    #[test]
    fn test_once_outside_window() {
        let t = txn("100.00", ymd(2024, 2, 5), Trigger::Once);
        assert!(t.expand(ymd(2024, 1, 1), ymd(2024, 1, 31)).is_empty());
        assert!(t.expand(ymd(2024, 2, 6), ymd(2024, 3, 1)).is_empty());
    }

    #[test]
    fn test_once_on_either_boundary() {
        let t = txn("1", ymd(2024, 1, 31), Trigger::Once);
        assert_eq!(t.expand(ymd(2024, 1, 1), ymd(2024, 1, 31)).len(), 1);
        assert_eq!(t.expand(ymd(2024, 1, 31), ymd(2024, 2, 28)).len(), 1);
        assert_eq!(t.expand(ymd(2024, 1, 31), ymd(2024, 1, 31)).len(), 1);
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let t = txn("1", ymd(2024, 1, 15), Trigger::Daily);
        assert!(t.expand(ymd(2024, 2, 1), ymd(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_monthly_expansion() {
        let t = txn("-50.00", ymd(2024, 1, 15), Trigger::Monthly);
        let expanded = t.expand(ymd(2024, 1, 1), ymd(2024, 3, 31));
        assert_eq!(
            dates(&expanded),
            vec![ymd(2024, 1, 15), ymd(2024, 2, 15), ymd(2024, 3, 15)]
        );
        for occurrence in &expanded {
            assert_eq!(occurrence.trigger(), Trigger::Once);
            assert_eq!(occurrence.amount(), dec("-50.00"));
            assert_eq!(occurrence.memo(), Some("test"));
        }
    }

    #[test]
    fn test_recurring_occurrence_on_end_is_included() {
        let t = txn("10", ymd(2024, 1, 1), Trigger::Weekly);
        let expanded = t.expand(ymd(2024, 1, 1), ymd(2024, 1, 15));
        assert_eq!(
            dates(&expanded),
            vec![ymd(2024, 1, 1), ymd(2024, 1, 8), ymd(2024, 1, 15)]
        );
    }

    #[test]
    fn test_recurring_anchor_after_window() {
        let t = txn("10", ymd(2024, 6, 1), Trigger::Daily);
        assert!(t.expand(ymd(2024, 1, 1), ymd(2024, 5, 31)).is_empty());
        assert!(t.expand_before(ymd(2024, 6, 1)).is_empty());
    }

    #[test]
    fn test_daily_from_long_ago() {
        let t = txn("1", ymd(1990, 3, 17), Trigger::Daily);
        let expanded = t.expand(ymd(2024, 2, 1), ymd(2024, 2, 29));
        assert_eq!(expanded.len(), 29);
        assert_eq!(expanded[0].date(), ymd(2024, 2, 1));
        assert_eq!(expanded[28].date(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_yearly_leap_day() {
        let t = txn("-20", ymd(2024, 2, 29), Trigger::Yearly);
        let expanded = t.expand(ymd(2024, 1, 1), ymd(2026, 12, 31));
        assert_eq!(
            dates(&expanded),
            vec![ymd(2024, 2, 29), ymd(2025, 2, 28), ymd(2026, 2, 28)]
        );
        let later = t.expand(ymd(2028, 1, 1), ymd(2028, 12, 31));
        assert_eq!(dates(&later), vec![ymd(2028, 2, 28)]);
    }

    #[test]
    fn test_monthly_from_month_end_stays_clamped() {
        let t = txn("-75", ymd(2024, 1, 31), Trigger::Monthly);
        let expanded = t.expand(ymd(2024, 1, 1), ymd(2024, 4, 30));
        assert_eq!(
            dates(&expanded),
            vec![ymd(2024, 1, 31), ymd(2024, 2, 29), ymd(2024, 3, 29), ymd(2024, 4, 29)]
        );
    }

    #[test]
    fn test_occurrences_are_reached_by_stepping_from_anchor() {
        let anchor = ymd(2023, 8, 31);
        for trigger in [Trigger::Daily, Trigger::Weekly, Trigger::Monthly, Trigger::Yearly] {
            let t = txn("1", anchor, trigger);
            let start = ymd(2024, 1, 10);
            let end = ymd(2026, 3, 3);
            for occurrence in t.expand(start, end) {
                let date = occurrence.date();
                assert!(start <= date && date <= end);
                let reachable = std::iter::successors(Some(anchor), |d| trigger.next(*d))
                    .take_while(|d| *d <= date)
                    .any(|d| d == date);
                assert!(reachable, "{trigger} produced unreachable {date}");
            }
        }
    }

    #[test]
    fn test_expand_before_is_exclusive() {
        let t = txn("5", ymd(2024, 1, 1), Trigger::Daily);
        let before = t.expand_before(ymd(2024, 1, 4));
        assert_eq!(
            dates(&before),
            vec![ymd(2024, 1, 1), ymd(2024, 1, 2), ymd(2024, 1, 3)]
        );

        let once = txn("5", ymd(2024, 1, 4), Trigger::Once);
        assert!(once.expand_before(ymd(2024, 1, 4)).is_empty());
        assert_eq!(once.expand_before(ymd(2024, 1, 5)).len(), 1);
    }

    #[test]
    fn test_expand_and_expand_before_partition_the_series() {
        let t = txn("5", ymd(2024, 1, 31), Trigger::Monthly);
        let cut = ymd(2024, 4, 30);
        let end = ymd(2024, 12, 31);
        let mut combined = t.expand_before(cut);
        combined.extend(t.expand(cut, end));
        let all = t.expand(ymd(2024, 1, 1), end);
        assert_eq!(combined, all);
        assert_eq!(all.len(), 12);
    }

    #[test]
    fn test_collapse_copies() {
        let t = txn("12.34", ymd(2024, 1, 1), Trigger::Monthly);
        let c = t.collapse(ymd(2024, 5, 1));
        assert_eq!(c.trigger(), Trigger::Once);
        assert_eq!(c.date(), ymd(2024, 5, 1));
        assert_eq!(c.memo(), t.memo());
        assert_eq!(c.amount(), t.amount());
        assert_eq!(t.trigger(), Trigger::Monthly);
        assert_eq!(t.date(), ymd(2024, 1, 1));
    }

    #[test]
    fn test_compare() {
        let early = txn("-5", ymd(2024, 1, 1), Trigger::Once);
        let late_small = txn("-5", ymd(2024, 1, 2), Trigger::Once);
        let late_big = txn("100", ymd(2024, 1, 2), Trigger::Once);
        assert_eq!(compare(&early, &late_big), Ordering::Less);
        assert_eq!(compare(&late_big, &late_small), Ordering::Less);
        assert_eq!(compare(&late_small, &late_big), Ordering::Greater);
        assert_eq!(compare(&late_small, &late_small.clone()), Ordering::Equal);
    }

    #[test]
    fn test_serialize() {
        let t = txn("-50.5", ymd(2024, 1, 15), Trigger::Monthly);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(
            json,
            r#"{"memo":"test","amount":-50.5,"date":"2024-01-15","trigger":"MONTHLY"}"#
        );
        let no_memo = Transaction::new(None::<String>, dec("1"), ymd(2024, 1, 1), Trigger::Once);
        let json = serde_json::to_string(&no_memo).unwrap();
        assert!(!json.contains("memo"));
    }
}
