//! Calendar-quarter arithmetic on month-start dates.

use chrono::{Datelike, Months};
use scr_primitives::Date;

/// Days from 0001-01-01 (CE) to the Unix epoch, the origin of polars dates.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Convert a polars physical date (days since the Unix epoch) to a [`Date`].
#[must_use]
pub fn date_from_days(days: i32) -> Option<Date> {
    Date::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// Convert a [`Date`] to a polars physical date (days since the Unix epoch).
#[must_use]
pub fn days_from_date(date: Date) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// First day of the calendar quarter containing `date`.
#[must_use]
pub fn quarter_start(date: Date) -> Date {
    let month = date.month0() / 3 * 3 + 1;
    Date::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
}

/// Retained month range after dropping incomplete boundary quarters.
///
/// `first` and `last` are the first and last month starts of a gap-free
/// monthly series. Leading months are dropped until a quarter starts
/// (months 1, 4, 7, 10) and trailing months until a quarter ends
/// (months 3, 6, 9, 12).
///
/// # Returns
/// The inclusive `(start, end)` month range, or `None` if no complete
/// quarter remains.
#[must_use]
pub fn trim_bounds(first: Date, last: Date) -> Option<(Date, Date)> {
    let leading = (3 - first.month0() % 3) % 3;
    let trailing = last.month() % 3;

    let start = first.checked_add_months(Months::new(leading))?;
    let end = last.checked_sub_months(Months::new(trailing))?;

    (start <= end).then_some((start, end))
}
