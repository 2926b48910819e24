//! Renderer-independent grid descriptions for the three calendar views.
//!
//! Geometry is fixed: the month view is always 6 weeks of 7 days, the week and
//! day views always cover the working hours 08:00 through 20:00.

use chrono::{Datelike, Duration, NaiveDate};

use super::bucket;
use crate::models::appointment::Appointment;
use crate::models::view::Granularity;
use crate::utils::date::{first_of_month, week_end, week_start};

/// Number of day cells in the month view.
pub const MONTH_GRID_CELLS: usize = 42;
/// Appointments shown directly in a month cell before the overflow counter.
pub const MONTH_PREVIEW_LIMIT: usize = 3;
pub const FIRST_HOUR: u32 = 8;
pub const LAST_HOUR: u32 = 20;

/// Which days get highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMarks {
    pub today: NaiveDate,
    pub selected: Option<NaiveDate>,
}

impl DayMarks {
    fn is_today(&self, date: NaiveDate) -> bool {
        self.today == date
    }

    fn is_selected(&self, date: NaiveDate) -> bool {
        self.selected == Some(date)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridDescription {
    Month(MonthGrid),
    Week(WeekGrid),
    Day(DayGrid),
}

impl GridDescription {
    pub fn granularity(&self) -> Granularity {
        match self {
            GridDescription::Month(_) => Granularity::Month,
            GridDescription::Week(_) => Granularity::Week,
            GridDescription::Day(_) => Granularity::Day,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthPlacement {
    CurrentMonth,
    OtherMonth,
}

/// Compact form of an appointment shown inside a month cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentSummary {
    pub id: String,
    pub time: String,
    pub pet_name: Option<String>,
    pub style_class: &'static str,
}

impl From<&Appointment> for AppointmentSummary {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id.clone(),
            time: appointment.appointment_time.clone(),
            pet_name: appointment.pet_name().map(str::to_string),
            style_class: appointment.appointment_type.style_class(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthCell {
    pub date: NaiveDate,
    pub placement: MonthPlacement,
    pub is_today: bool,
    pub is_selected: bool,
    pub shown: Vec<AppointmentSummary>,
    /// Appointments beyond the preview limit
    pub overflow: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<MonthCell>,
}

impl MonthGrid {
    /// Cells grouped by week, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[MonthCell]> {
        self.cells.chunks(7)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekDayHeader {
    pub date: NaiveDate,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourCell {
    pub date: NaiveDate,
    pub hour: u32,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourRow {
    pub hour: u32,
    pub cells: Vec<HourCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<WeekDayHeader>,
    pub rows: Vec<HourRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySlot {
    pub hour: u32,
    pub appointments: Vec<Appointment>,
    /// Empty slots offer the "new appointment" action.
    pub accepts_new: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayGrid {
    pub date: NaiveDate,
    pub is_today: bool,
    /// All appointments of the day, including those outside the hour rows.
    pub total: usize,
    pub slots: Vec<DaySlot>,
}

pub fn build_grid(
    granularity: Granularity,
    focused: NaiveDate,
    appointments: &[Appointment],
    marks: &DayMarks,
) -> GridDescription {
    match granularity {
        Granularity::Month => GridDescription::Month(build_month(focused, appointments, marks)),
        Granularity::Week => GridDescription::Week(build_week(focused, appointments, marks)),
        Granularity::Day => GridDescription::Day(build_day(focused, appointments, marks)),
    }
}

fn build_month(focused: NaiveDate, appointments: &[Appointment], marks: &DayMarks) -> MonthGrid {
    let start = week_start(first_of_month(focused));

    let cells = (0..MONTH_GRID_CELLS)
        .map(|offset| {
            let date = start + Duration::days(offset as i64);
            let bucket = bucket::on_date(appointments, date);
            let placement = if date.month() == focused.month() && date.year() == focused.year() {
                MonthPlacement::CurrentMonth
            } else {
                MonthPlacement::OtherMonth
            };

            MonthCell {
                date,
                placement,
                is_today: marks.is_today(date),
                is_selected: marks.is_selected(date),
                shown: bucket
                    .iter()
                    .take(MONTH_PREVIEW_LIMIT)
                    .map(|appointment| AppointmentSummary::from(*appointment))
                    .collect(),
                overflow: bucket.len().saturating_sub(MONTH_PREVIEW_LIMIT),
            }
        })
        .collect();

    MonthGrid {
        year: focused.year(),
        month: focused.month(),
        cells,
    }
}

fn build_week(focused: NaiveDate, appointments: &[Appointment], marks: &DayMarks) -> WeekGrid {
    let start = week_start(focused);
    let dates: Vec<NaiveDate> = (0..7).map(|offset| start + Duration::days(offset)).collect();

    let days = dates
        .iter()
        .map(|&date| WeekDayHeader {
            date,
            is_today: marks.is_today(date),
        })
        .collect();

    let rows = (FIRST_HOUR..=LAST_HOUR)
        .map(|hour| HourRow {
            hour,
            cells: dates
                .iter()
                .map(|&date| HourCell {
                    date,
                    hour,
                    appointments: cloned(bucket::on_date_hour(appointments, date, hour)),
                })
                .collect(),
        })
        .collect();

    WeekGrid {
        start,
        end: week_end(focused),
        days,
        rows,
    }
}

fn build_day(focused: NaiveDate, appointments: &[Appointment], marks: &DayMarks) -> DayGrid {
    let slots = (FIRST_HOUR..=LAST_HOUR)
        .map(|hour| {
            let bucket = cloned(bucket::on_date_hour(appointments, focused, hour));
            DaySlot {
                hour,
                accepts_new: bucket.is_empty(),
                appointments: bucket,
            }
        })
        .collect();

    DayGrid {
        date: focused,
        is_today: marks.is_today(focused),
        total: bucket::on_date(appointments, focused).len(),
        slots,
    }
}

fn cloned(bucket: Vec<&Appointment>) -> Vec<Appointment> {
    bucket.into_iter().cloned().collect()
}
