// Property-based tests for calendar bucketing, navigation and grid geometry
// Exercises the engine helpers with random dates and appointment sets

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Weekday};
use proptest::prelude::*;
use vet_calendar::models::appointment::Appointment;
use vet_calendar::models::view::{Direction, Granularity};
use vet_calendar::services::calendar::bucket::{on_date, on_date_hour};
use vet_calendar::services::calendar::grid::{MONTH_GRID_CELLS, MONTH_PREVIEW_LIMIT};
use vet_calendar::services::calendar::navigation::step;
use vet_calendar::services::calendar::{build_grid, DayMarks, GridDescription};
use vet_calendar::utils::date::ClinicZone;

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (2000..2100i32, 1..=12u32, 1..=31u32).prop_filter_map("valid date", |(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d)
    })
}

fn any_time() -> impl Strategy<Value = (u32, u32)> {
    (0..24u32, 0..60u32)
}

fn appointments_around(base: NaiveDate) -> impl Strategy<Value = Vec<Appointment>> {
    prop::collection::vec((-3..=3i64, any_time()), 0..30).prop_map(move |specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(index, (offset, (hour, minute)))| {
                Appointment::new(
                    index.to_string(),
                    base + Duration::days(offset),
                    format!("{:02}:{:02}", hour, minute),
                )
            })
            .collect()
    })
}

fn month_cells(focused: NaiveDate, appointments: &[Appointment]) -> Vec<(NaiveDate, usize, usize)> {
    let marks = DayMarks {
        today: focused,
        selected: None,
    };
    match build_grid(Granularity::Month, focused, appointments, &marks) {
        GridDescription::Month(grid) => grid
            .cells
            .into_iter()
            .map(|cell| (cell.date, cell.shown.len(), cell.overflow))
            .collect(),
        _ => Vec::new(),
    }
}

proptest! {
    /// Property: date filtering keeps exactly the appointments on that date
    #[test]
    fn prop_on_date_matches_date_component(
        (base, appointments) in any_date().prop_flat_map(|base| (Just(base), appointments_around(base))),
        hour in 0..24u32,
        minute in 0..60u32,
    ) {
        let utc = ClinicZone::parse("UTC").unwrap();
        let instant = chrono::Utc
            .with_ymd_and_hms(base.year(), base.month(), base.day(), hour, minute, 0)
            .unwrap();
        let day = utc.date_of(&instant);
        prop_assert_eq!(day, base);

        let bucket = on_date(&appointments, day);
        let expected = appointments.iter().filter(|a| a.appointment_date == base).count();
        prop_assert_eq!(bucket.len(), expected);
        prop_assert!(bucket.iter().all(|a| a.appointment_date == base));
    }

    /// Property: buckets are ordered by start time
    #[test]
    fn prop_on_date_is_time_ordered(appointments in appointments_around(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())) {
        let bucket = on_date(&appointments, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        let times: Vec<_> = bucket.iter().map(|a| a.start_time()).collect();
        let mut sorted = times.clone();
        sorted.sort();
        prop_assert_eq!(times, sorted);
    }

    /// Property: an HH:MM appointment lands in bucket HH and no other
    #[test]
    fn prop_hour_bucket_ignores_minutes(date in any_date(), (hour, minute) in any_time()) {
        let appointments = vec![Appointment::new("a", date, format!("{:02}:{:02}", hour, minute))];
        for candidate in 0..24u32 {
            let found = on_date_hour(&appointments, date, candidate).len();
            prop_assert_eq!(found, usize::from(candidate == hour));
        }
    }

    /// Property: the month grid is 42 consecutive days from a Sunday and contains the 1st
    #[test]
    fn prop_month_grid_geometry(focused in any_date()) {
        let cells = month_cells(focused, &[]);
        prop_assert_eq!(cells.len(), MONTH_GRID_CELLS);

        let first = cells[0].0;
        prop_assert_eq!(first.weekday(), Weekday::Sun);
        for (offset, (date, _, _)) in cells.iter().enumerate() {
            prop_assert_eq!(*date, first + Duration::days(offset as i64));
        }

        let first_of_month = focused.with_day(1).unwrap();
        prop_assert!(first <= first_of_month);
        prop_assert!(first_of_month - first < Duration::days(7));
    }

    /// Property: a cell shows at most three appointments and counts the rest
    #[test]
    fn prop_month_cell_overflow(count in 0..12usize) {
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let appointments: Vec<Appointment> = (0..count)
            .map(|i| Appointment::new(i.to_string(), day, format!("{:02}:00", 8 + i)))
            .collect();
        let cells = month_cells(day, &appointments);
        let (_, shown, overflow) = cells.into_iter().find(|(date, _, _)| *date == day).unwrap();

        prop_assert_eq!(shown, count.min(MONTH_PREVIEW_LIMIT));
        prop_assert_eq!(overflow, count.saturating_sub(MONTH_PREVIEW_LIMIT));
    }

    /// Property: week steps move exactly seven days
    #[test]
    fn prop_week_step_is_seven_days(date in any_date()) {
        let back = step(date, Granularity::Week, Direction::Backward);
        let forward = step(date, Granularity::Week, Direction::Forward);
        prop_assert_eq!(date - back, Duration::days(7));
        prop_assert_eq!(forward - date, Duration::days(7));
    }

    /// Property: month steps keep days that exist in every month
    #[test]
    fn prop_month_step_advances_one_month(year in 2000..2100i32, month in 1..=12u32, day in 1..=28u32) {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let next = step(date, Granularity::Month, Direction::Forward);

        let expected_month = if month == 12 { 1 } else { month + 1 };
        let expected_year = if month == 12 { year + 1 } else { year };
        prop_assert_eq!((next.year(), next.month(), next.day()), (expected_year, expected_month, day));
        prop_assert_eq!(step(next, Granularity::Month, Direction::Backward), date);
    }
}
