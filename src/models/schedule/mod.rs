// Schedule module
// Weekly working hours as exchanged with the schedule endpoints

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::appointment::deserialize_optional_id;

/// Default working window for a day that has never been configured.
pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "17:00";
pub const DEFAULT_BREAK_START: &str = "12:00";
pub const DEFAULT_BREAK_END: &str = "13:00";

/// Order in which the editor lists the week.
pub const DISPLAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// One day of the week as stored by the backend. `day_of_week` counts from
/// Sunday = 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub break_start: Option<String>,
    #[serde(default)]
    pub break_end: Option<String>,
    pub is_available: bool,
    #[serde(
        default,
        alias = "schedule_id",
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
}

impl ScheduleEntry {
    pub fn weekday(&self) -> Option<Weekday> {
        weekday_from_number(self.day_of_week)
    }
}

pub fn weekday_from_number(day_of_week: u8) -> Option<Weekday> {
    match day_of_week {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn weekday_number(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Editable state of a single weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    pub active: bool,
    pub start_time: String,
    pub end_time: String,
    pub break_start: String,
    pub break_end: String,
    pub schedule_id: Option<String>,
}

impl Default for DaySchedule {
    fn default() -> Self {
        Self {
            active: false,
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
            break_start: DEFAULT_BREAK_START.to_string(),
            break_end: DEFAULT_BREAK_END.to_string(),
            schedule_id: None,
        }
    }
}

impl DaySchedule {
    pub fn from_entry(entry: &ScheduleEntry) -> Self {
        Self {
            active: entry.is_available,
            start_time: entry.start_time.clone(),
            end_time: entry.end_time.clone(),
            break_start: entry
                .break_start
                .clone()
                .unwrap_or_else(|| DEFAULT_BREAK_START.to_string()),
            break_end: entry
                .break_end
                .clone()
                .unwrap_or_else(|| DEFAULT_BREAK_END.to_string()),
            schedule_id: entry.id.clone(),
        }
    }

    pub fn to_entry(&self, weekday: Weekday) -> ScheduleEntry {
        ScheduleEntry {
            day_of_week: weekday_number(weekday),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            break_start: Some(self.break_start.clone()),
            break_end: Some(self.break_end.clone()),
            is_available: self.active,
            id: self.schedule_id.clone(),
        }
    }
}

/// Which time of a day is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
    BreakStart,
    BreakEnd,
}

impl TimeField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "start_time" | "start" => Some(TimeField::Start),
            "end_time" | "end" => Some(TimeField::End),
            "break_start" => Some(TimeField::BreakStart),
            "break_end" => Some(TimeField::BreakEnd),
            _ => None,
        }
    }
}
