use chrono::{Datelike, Duration, NaiveDate};

use crate::models::view::{Direction, Granularity};

/// Move `current` by one unit of `granularity` in `direction`.
pub fn step(current: NaiveDate, granularity: Granularity, direction: Direction) -> NaiveDate {
    let sign = direction.sign();
    match granularity {
        Granularity::Month => shift_month_rolling_over(current, sign),
        Granularity::Week => current + Duration::weeks(sign as i64),
        Granularity::Day => current + Duration::days(sign as i64),
    }
}

/// Shift by whole months keeping the day-of-month number. A day that does not
/// exist in the target month spills into the following one, so Jan 31 plus
/// one month is Mar 3 in a common year.
pub fn shift_month_rolling_over(current: NaiveDate, delta_months: i32) -> NaiveDate {
    let total_months = (current.year() * 12) + (current.month() as i32 - 1) + delta_months;
    let new_year = total_months.div_euclid(12);
    let new_month = total_months.rem_euclid(12) as u32 + 1;

    match NaiveDate::from_ymd_opt(new_year, new_month, 1) {
        Some(first) => first + Duration::days(current.day() as i64 - 1),
        None => current,
    }
}
