// Date utility functions
// Week and month boundaries plus wall-clock parsing for appointment times

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// The Sunday on or before `date`. Weeks always start on Sunday.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// The Saturday on or after `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    date + Duration::days(6 - date.weekday().num_days_from_sunday() as i64)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Parse an `HH:MM` or `HH:MM:SS` wall-clock string.
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
}

/// Hour component of a wall-clock string. Minutes are ignored, so
/// `"09:30"` is hour 9.
pub fn parse_hour(value: &str) -> Option<u32> {
    let hour = value.trim().split(':').next()?.trim();
    match hour.parse::<u32>() {
        Ok(hour) if hour < 24 => Some(hour),
        _ => None,
    }
}

pub fn minutes_since_midnight(time: NaiveTime) -> i64 {
    (time.hour() * 60 + time.minute()) as i64
}

/// Format an hour as the `HH:00` slot label used in query strings.
pub fn hour_slot(hour: u32) -> String {
    format!("{:02}:00", hour)
}

/// Time zone the clinic's calendar days are counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClinicZone {
    #[default]
    Local,
    Named(Tz),
}

impl ClinicZone {
    pub fn parse(name: &str) -> Option<Self> {
        name.trim().parse::<Tz>().ok().map(ClinicZone::Named)
    }

    /// Calendar date of an instant as seen from the clinic.
    pub fn date_of<Z: TimeZone>(&self, instant: &DateTime<Z>) -> NaiveDate {
        match self {
            ClinicZone::Local => instant.with_timezone(&Local).date_naive(),
            ClinicZone::Named(tz) => instant.with_timezone(tz).date_naive(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.date_of(&Utc::now())
    }
}
