//! Weekly working-hours editor.

use chrono::Weekday;
use thiserror::Error;

use crate::models::dashboard::DashboardStats;
use crate::models::schedule::{
    DaySchedule, ScheduleEntry, TimeField, DEFAULT_BREAK_END, DEFAULT_BREAK_START, DEFAULT_END_TIME,
    DEFAULT_START_TIME, DISPLAY_ORDER,
};
use crate::services::api::{ClientError, ClinicApi};
use crate::utils::date::{minutes_since_midnight, parse_clock_time};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Invalid time '{value}' for {field:?}, expected HH:MM")]
    InvalidTime { field: TimeField, value: String },
}

/// Aggregates shown under the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleSummary {
    pub working_days: usize,
    pub total_hours: f64,
    pub daily_average: f64,
}

/// Appointment counters shown next to the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppointmentCounts {
    pub today: u32,
    pub week: u32,
}

impl From<&DashboardStats> for AppointmentCounts {
    fn from(stats: &DashboardStats) -> Self {
        Self {
            today: stats.today_appointments_count,
            week: stats.week_appointments,
        }
    }
}

pub struct ScheduleEditor<A: ClinicApi> {
    api: A,
    // Indexed by days from Monday.
    days: [DaySchedule; 7],
    loaded: bool,
}

fn slot(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

impl<A: ClinicApi> ScheduleEditor<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            days: Default::default(),
            loaded: false,
        }
    }

    /// False until a load succeeds; the editor shows an empty state meanwhile.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        &self.days[slot(weekday)]
    }

    /// Days in display order, Monday first.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        DISPLAY_ORDER.iter().map(move |weekday| (*weekday, self.day(*weekday)))
    }

    /// Replace local state with the server's schedule.
    pub fn load(&mut self) -> Result<(), ScheduleError> {
        match self.api.schedule_data() {
            Ok(entries) => {
                self.apply_entries(&entries);
                self.loaded = true;
                log::info!("Loaded schedule with {} entries", entries.len());
                Ok(())
            }
            Err(err) => {
                log::error!("Error loading schedule: {}", err);
                self.loaded = false;
                Err(err.into())
            }
        }
    }

    fn apply_entries(&mut self, entries: &[ScheduleEntry]) {
        self.days = Default::default();
        for entry in entries {
            match entry.weekday() {
                Some(weekday) => self.days[slot(weekday)] = DaySchedule::from_entry(entry),
                None => log::warn!("Ignoring schedule entry with day_of_week {}", entry.day_of_week),
            }
        }
    }

    pub fn toggle_day(&mut self, weekday: Weekday) {
        let day = &mut self.days[slot(weekday)];
        day.active = !day.active;
        log::debug!("{:?} active: {}", weekday, day.active);
    }

    pub fn update_day_time(&mut self, weekday: Weekday, field: TimeField, value: &str) -> Result<(), ScheduleError> {
        let time = parse_clock_time(value).ok_or_else(|| ScheduleError::InvalidTime {
            field,
            value: value.to_string(),
        })?;
        let formatted = time.format("%H:%M").to_string();

        let day = &mut self.days[slot(weekday)];
        match field {
            TimeField::Start => day.start_time = formatted,
            TimeField::End => day.end_time = formatted,
            TimeField::BreakStart => day.break_start = formatted,
            TimeField::BreakEnd => day.break_end = formatted,
        }
        Ok(())
    }

    /// Working hours of one day net of its break. Unreadable times count as zero.
    pub fn day_hours(&self, weekday: Weekday) -> f64 {
        hours_of(self.day(weekday))
    }

    pub fn summary(&self) -> ScheduleSummary {
        let active: Vec<&DaySchedule> = self.days.iter().filter(|day| day.active).collect();
        let total_hours: f64 = active.iter().map(|day| hours_of(day)).sum();
        let working_days = active.len();
        let daily_average = if working_days > 0 {
            total_hours / working_days as f64
        } else {
            0.0
        };

        ScheduleSummary {
            working_days,
            total_hours,
            daily_average,
        }
    }

    /// Monday to Friday 09:00-17:00 with a lunch break; weekends off.
    pub fn set_default_hours(&mut self) {
        for weekday in DISPLAY_ORDER {
            let day = &mut self.days[slot(weekday)];
            day.active = !matches!(weekday, Weekday::Sat | Weekday::Sun);
            day.start_time = DEFAULT_START_TIME.to_string();
            day.end_time = DEFAULT_END_TIME.to_string();
            day.break_start = DEFAULT_BREAK_START.to_string();
            day.break_end = DEFAULT_BREAK_END.to_string();
        }
    }

    pub fn to_api_format(&self) -> Vec<ScheduleEntry> {
        self.days().map(|(weekday, day)| day.to_entry(weekday)).collect()
    }

    /// Post the schedule. Returns the server's message, if any. Callers
    /// reload afterwards so a failed reload is not mistaken for a failed save.
    pub fn save(&self) -> Result<Option<String>, ScheduleError> {
        let entries = self.to_api_format();
        let message = self.api.save_schedule(&entries).map_err(|err| {
            log::error!("Error saving schedule: {}", err);
            ScheduleError::from(err)
        })?;
        log::info!("Saved schedule ({} days)", entries.len());
        Ok(message)
    }

    /// Drop local edits.
    pub fn reset(&mut self) -> Result<(), ScheduleError> {
        self.load()
    }

    /// Today's and this week's appointment counters. Failures only get logged.
    pub fn appointment_counts(&self) -> Option<AppointmentCounts> {
        match self.api.dashboard_data() {
            Ok(data) => Some(AppointmentCounts::from(&data.stats)),
            Err(err) => {
                log::error!("Error loading appointment stats: {}", err);
                None
            }
        }
    }
}

fn minutes_of(value: &str) -> Option<i64> {
    parse_clock_time(value).map(minutes_since_midnight)
}

fn hours_of(day: &DaySchedule) -> f64 {
    if !day.active {
        return 0.0;
    }
    let span = match (minutes_of(&day.start_time), minutes_of(&day.end_time)) {
        (Some(start), Some(end)) => end - start,
        _ => return 0.0,
    };
    let pause = match (minutes_of(&day.break_start), minutes_of(&day.break_end)) {
        (Some(start), Some(end)) => end - start,
        _ => 0,
    };
    (span - pause) as f64 / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dashboard::DashboardData;
    use crate::services::api::MockClinicApi;
    use pretty_assertions::assert_eq;

    fn entry(day_of_week: u8, start: &str, end: &str, id: &str) -> ScheduleEntry {
        ScheduleEntry {
            day_of_week,
            start_time: start.to_string(),
            end_time: end.to_string(),
            break_start: None,
            break_end: None,
            is_available: true,
            id: Some(id.to_string()),
        }
    }

    fn loaded_editor(entries: Vec<ScheduleEntry>) -> ScheduleEditor<MockClinicApi> {
        let mut api = MockClinicApi::new();
        api.expect_schedule_data().returning(move || Ok(entries.clone()));
        let mut editor = ScheduleEditor::new(api);
        editor.load().unwrap();
        editor
    }

    #[test]
    fn test_load_overrides_only_listed_days() {
        let editor = loaded_editor(vec![entry(1, "08:00", "16:00", "a"), entry(0, "10:00", "12:00", "b")]);

        let monday = editor.day(Weekday::Mon);
        assert!(monday.active);
        assert_eq!(monday.start_time, "08:00");
        assert_eq!(monday.break_start, DEFAULT_BREAK_START);
        assert_eq!(monday.schedule_id.as_deref(), Some("a"));

        assert_eq!(editor.day(Weekday::Sun).schedule_id.as_deref(), Some("b"));
        assert_eq!(editor.day(Weekday::Tue), &DaySchedule::default());
    }

    #[test]
    fn test_days_are_listed_monday_first() {
        let editor = ScheduleEditor::new(MockClinicApi::new());
        let order: Vec<Weekday> = editor.days().map(|(weekday, _)| weekday).collect();
        assert_eq!(order.first(), Some(&Weekday::Mon));
        assert_eq!(order.last(), Some(&Weekday::Sun));
    }

    #[test]
    fn test_load_failure_leaves_empty_state() {
        let mut api = MockClinicApi::new();
        api.expect_schedule_data()
            .returning(|| Err(ClientError::Api("Sin permisos".to_string())));
        let mut editor = ScheduleEditor::new(api);

        let err = editor.load().unwrap_err();
        assert!(matches!(err, ScheduleError::Client(ClientError::Api(_))));
        assert!(!editor.is_loaded());
    }

    #[test]
    fn test_day_hours_subtracts_break() {
        let editor = loaded_editor(vec![entry(1, "09:00", "17:00", "a")]);
        assert_eq!(editor.day_hours(Weekday::Mon), 7.0);
        assert_eq!(editor.day_hours(Weekday::Tue), 0.0);
    }

    #[test]
    fn test_update_day_time_rejects_garbage() {
        let mut editor = ScheduleEditor::new(MockClinicApi::new());
        let err = editor
            .update_day_time(Weekday::Mon, TimeField::End, "cinco")
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTime { field: TimeField::End, .. }));
        assert_eq!(editor.day(Weekday::Mon).end_time, DEFAULT_END_TIME);
    }

    #[test]
    fn test_update_day_time_changes_hours() {
        let mut editor = ScheduleEditor::new(MockClinicApi::new());
        editor.toggle_day(Weekday::Wed);
        editor.update_day_time(Weekday::Wed, TimeField::End, "18:30").unwrap();
        editor.update_day_time(Weekday::Wed, TimeField::BreakEnd, "12:30").unwrap();
        assert_eq!(editor.day_hours(Weekday::Wed), 9.0);
    }

    #[test]
    fn test_summary_with_default_hours() {
        let mut editor = ScheduleEditor::new(MockClinicApi::new());
        editor.set_default_hours();

        let summary = editor.summary();
        assert_eq!(summary.working_days, 5);
        assert_eq!(summary.total_hours, 35.0);
        assert_eq!(summary.daily_average, 7.0);
        assert!(!editor.day(Weekday::Sat).active);
    }

    #[test]
    fn test_summary_without_working_days() {
        let editor = ScheduleEditor::new(MockClinicApi::new());
        let summary = editor.summary();
        assert_eq!(summary.working_days, 0);
        assert_eq!(summary.daily_average, 0.0);
    }

    #[test]
    fn test_default_hours_keep_entry_ids() {
        let mut editor = loaded_editor(vec![entry(2, "07:00", "11:00", "tue")]);
        editor.set_default_hours();
        let tuesday = editor.day(Weekday::Tue);
        assert_eq!(tuesday.start_time, DEFAULT_START_TIME);
        assert_eq!(tuesday.schedule_id.as_deref(), Some("tue"));
    }

    #[test]
    fn test_api_format_has_every_day() {
        let editor = ScheduleEditor::new(MockClinicApi::new());
        let entries = editor.to_api_format();
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0].day_of_week, 1);
        assert_eq!(entries[6].day_of_week, 0);
        assert!(entries.iter().all(|entry| !entry.is_available));
    }

    #[test]
    fn test_save_posts_without_reloading() {
        let mut api = MockClinicApi::new();
        api.expect_save_schedule()
            .withf(|entries: &[ScheduleEntry]| entries.len() == 7 && entries[0].is_available)
            .times(1)
            .returning(|_| Ok(Some("Horario guardado".to_string())));
        api.expect_schedule_data().never();

        let mut editor = ScheduleEditor::new(api);
        editor.toggle_day(Weekday::Mon);
        let message = editor.save().unwrap();

        assert_eq!(message.as_deref(), Some("Horario guardado"));
        assert!(editor.day(Weekday::Mon).active);
    }

    #[test]
    fn test_save_failure_keeps_local_edits() {
        let mut api = MockClinicApi::new();
        api.expect_save_schedule()
            .returning(|_| Err(ClientError::Fetch("offline".to_string())));
        api.expect_schedule_data().never();

        let mut editor = ScheduleEditor::new(api);
        editor.toggle_day(Weekday::Fri);
        assert!(editor.save().is_err());
        assert!(editor.day(Weekday::Fri).active);
    }

    #[test]
    fn test_reset_discards_edits() {
        let mut editor = loaded_editor(vec![]);
        editor.toggle_day(Weekday::Thu);
        editor.reset().unwrap();
        assert!(!editor.day(Weekday::Thu).active);
    }

    #[test]
    fn test_appointment_counts() {
        let mut api = MockClinicApi::new();
        let mut calls = 0;
        api.expect_dashboard_data().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                let mut data = DashboardData::default();
                data.stats.today_appointments_count = 4;
                data.stats.week_appointments = 19;
                Ok(data)
            } else {
                Err(ClientError::Fetch("down".to_string()))
            }
        });
        let editor = ScheduleEditor::new(api);

        assert_eq!(editor.appointment_counts(), Some(AppointmentCounts { today: 4, week: 19 }));
        assert_eq!(editor.appointment_counts(), None);
    }
}
