// Test fixtures - reusable test data
// Provides consistent appointments, dashboard snapshots and a scripted backend

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use chrono::NaiveDate;
use vet_calendar::models::appointment::{Appointment, AppointmentStatus, AppointmentType};
use vet_calendar::models::dashboard::{DashboardData, Patient};
use vet_calendar::models::schedule::ScheduleEntry;
use vet_calendar::services::api::{ClientError, ClientResult, ClinicApi};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday Jan 15, 2025
    pub fn mid_january_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    /// Dec 10, 2024 (one step before a year change)
    pub fn december_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 10).unwrap()
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }
}

/// Sample appointments for testing
pub mod appointments {
    use super::*;

    pub fn vaccination(id: &str, date: NaiveDate, time: &str) -> Appointment {
        let mut appointment = Appointment::new(id, date, time);
        appointment.appointment_type = AppointmentType::Vaccination;
        appointment.pet_name = Some("Luna".to_string());
        appointment.owner_name = Some("Ana Torres".to_string());
        appointment
    }

    pub fn surgery(id: &str, date: NaiveDate, time: &str) -> Appointment {
        let mut appointment = Appointment::new(id, date, time);
        appointment.appointment_type = AppointmentType::Surgery;
        appointment.status = AppointmentStatus::Confirmed;
        appointment.pet_name = Some("Max".to_string());
        appointment.reason = Some("Esterilización".to_string());
        appointment
    }

    /// Five appointments on one day, listed out of time order.
    pub fn busy_day(date: NaiveDate) -> Vec<Appointment> {
        vec![
            vaccination("5", date, "16:00"),
            surgery("2", date, "09:30"),
            vaccination("1", date, "09:00"),
            vaccination("4", date, "14:15"),
            surgery("3", date, "11:00"),
        ]
    }
}

/// Sample dashboard payloads
pub mod dashboard {
    use super::*;

    pub fn snapshot() -> DashboardData {
        let mut data = DashboardData::default();
        data.user_info.name = Some("Ramírez".to_string());
        data.user_info.initial = Some("R".to_string());
        data.stats.today_appointments_count = 2;
        data.stats.total_patients = 87;
        data.stats.week_appointments = 11;
        data.today_appointments = vec![
            appointments::vaccination("10", dates::mid_january_2025(), "10:00"),
            appointments::surgery("11", dates::mid_january_2025(), "12:00"),
        ];
        data.recent_patients = vec![Patient {
            id: "p-1".to_string(),
            name: Some("Luna".to_string()),
            species: Some("Gato".to_string()),
            breed: None,
            age: Some(3),
            last_visit: Some("2025-01-08".to_string()),
            photo_url: None,
        }];
        data
    }
}

/// In-memory backend that replays queued responses and records requests.
#[derive(Default)]
pub struct ScriptedApi {
    calendar: RefCell<VecDeque<ClientResult<Vec<Appointment>>>>,
    dashboard: RefCell<VecDeque<ClientResult<DashboardData>>>,
    schedules: RefCell<VecDeque<ClientResult<Vec<ScheduleEntry>>>>,
    pub calendar_requests: RefCell<Vec<(u32, i32)>>,
    pub saved: RefCell<Vec<Vec<ScheduleEntry>>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_calendar(&self, response: ClientResult<Vec<Appointment>>) -> &Self {
        self.calendar.borrow_mut().push_back(response);
        self
    }

    pub fn push_dashboard(&self, response: ClientResult<DashboardData>) -> &Self {
        self.dashboard.borrow_mut().push_back(response);
        self
    }

    pub fn push_schedules(&self, response: ClientResult<Vec<ScheduleEntry>>) -> &Self {
        self.schedules.borrow_mut().push_back(response);
        self
    }

    pub fn calendar_request_count(&self) -> usize {
        self.calendar_requests.borrow().len()
    }
}

fn unscripted<T>() -> ClientResult<T> {
    Err(ClientError::Fetch("no scripted response".to_string()))
}

impl ClinicApi for ScriptedApi {
    fn calendar_data(&self, month: u32, year: i32) -> ClientResult<Vec<Appointment>> {
        self.calendar_requests.borrow_mut().push((month, year));
        self.calendar.borrow_mut().pop_front().unwrap_or_else(unscripted)
    }

    fn dashboard_data(&self) -> ClientResult<DashboardData> {
        self.dashboard.borrow_mut().pop_front().unwrap_or_else(unscripted)
    }

    fn schedule_data(&self) -> ClientResult<Vec<ScheduleEntry>> {
        self.schedules.borrow_mut().pop_front().unwrap_or_else(unscripted)
    }

    fn save_schedule(&self, schedules: &[ScheduleEntry]) -> ClientResult<Option<String>> {
        self.saved.borrow_mut().push(schedules.to_vec());
        Ok(Some("Horario guardado".to_string()))
    }
}
