//! Backend access for the staff console.
//!
//! [`ClinicApi`] is the seam every screen depends on. [`HttpClinicApi`] talks
//! to the real backend; tests substitute mocks or scripted fakes.

pub mod http;

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::appointment::{deserialize_appointment_list, Appointment};
use crate::models::dashboard::DashboardData;
use crate::models::schedule::ScheduleEntry;

pub use http::HttpClinicApi;

/// Failure of a backend call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Network or transport failure, including bodies that are not a valid envelope.
    #[error("Network error: {0}")]
    Fetch(String),

    /// The backend answered with `success: false`.
    #[error("API error: {0}")]
    Api(String),
}

impl ClientError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, ClientError::Fetch(_))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Data-fetching collaborator for the calendar, dashboard and schedule screens.
#[cfg_attr(test, mockall::automock)]
pub trait ClinicApi {
    /// All appointments of `month` (1-12) in `year`.
    fn calendar_data(&self, month: u32, year: i32) -> ClientResult<Vec<Appointment>>;

    fn dashboard_data(&self) -> ClientResult<DashboardData>;

    fn schedule_data(&self) -> ClientResult<Vec<ScheduleEntry>>;

    /// Persist the weekly schedule. Returns the backend's message, if any.
    fn save_schedule(&self, schedules: &[ScheduleEntry]) -> ClientResult<Option<String>>;
}

impl<T: ClinicApi + ?Sized> ClinicApi for &T {
    fn calendar_data(&self, month: u32, year: i32) -> ClientResult<Vec<Appointment>> {
        (**self).calendar_data(month, year)
    }

    fn dashboard_data(&self) -> ClientResult<DashboardData> {
        (**self).dashboard_data()
    }

    fn schedule_data(&self) -> ClientResult<Vec<ScheduleEntry>> {
        (**self).schedule_data()
    }

    fn save_schedule(&self, schedules: &[ScheduleEntry]) -> ClientResult<Option<String>> {
        (**self).save_schedule(schedules)
    }
}

impl<T: ClinicApi + ?Sized> ClinicApi for Rc<T> {
    fn calendar_data(&self, month: u32, year: i32) -> ClientResult<Vec<Appointment>> {
        (**self).calendar_data(month, year)
    }

    fn dashboard_data(&self) -> ClientResult<DashboardData> {
        (**self).dashboard_data()
    }

    fn schedule_data(&self) -> ClientResult<Vec<ScheduleEntry>> {
        (**self).schedule_data()
    }

    fn save_schedule(&self, schedules: &[ScheduleEntry]) -> ClientResult<Option<String>> {
        (**self).save_schedule(schedules)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarDataResponse {
    #[serde(default, deserialize_with = "deserialize_appointment_list")]
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleDataResponse {
    #[serde(default)]
    pub schedules: Vec<ScheduleEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveScheduleResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Decode a `{ success, message?, ...payload }` envelope.
///
/// `success: false` becomes [`ClientError::Api`]; anything that is not a
/// JSON object with a boolean `success` becomes [`ClientError::Fetch`].
pub fn decode_envelope<T: DeserializeOwned>(body: &str, default_message: &str) -> ClientResult<T> {
    let value: Value = serde_json::from_str(body)
        .map_err(|err| ClientError::Fetch(format!("Invalid response body: {}", err)))?;

    let success = value
        .get("success")
        .and_then(Value::as_bool)
        .ok_or_else(|| ClientError::Fetch("Response is missing the success flag".to_string()))?;

    if !success {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(default_message);
        return Err(ClientError::Api(message.to_string()));
    }

    serde_json::from_value(value)
        .map_err(|err| ClientError::Fetch(format!("Unexpected response shape: {}", err)))
}
