use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::{
    decode_envelope, CalendarDataResponse, ClientError, ClientResult, ClinicApi,
    SaveScheduleResponse, ScheduleDataResponse,
};
use crate::models::appointment::Appointment;
use crate::models::dashboard::DashboardData;
use crate::models::schedule::ScheduleEntry;
use crate::models::settings::Settings;

const API_PREFIX: &str = "/api/veterinarian";

pub struct HttpClinicApi {
    client: Client,
    base_url: String,
    max_response_bytes: usize,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl HttpClinicApi {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .context("Failed to build clinic API HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            max_response_bytes: 5 * 1024 * 1024,
            max_retries: settings.max_retries,
            retry_delay_ms: settings.retry_delay_ms,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_url, API_PREFIX, path)
    }

    /// GET with retries on transport failures. A well-formed `success: false`
    /// answer is final and never retried.
    fn get_with_retry<T, F>(&self, path: &str, build: F, default_message: &str) -> ClientResult<T>
    where
        T: DeserializeOwned,
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let url = self.endpoint(path);
        let mut attempt = 0;

        loop {
            let request = build(self.client.get(&url));
            match self.send(request, default_message) {
                Err(ClientError::Fetch(message)) if attempt < self.max_retries => {
                    attempt += 1;
                    log::warn!("GET {} attempt {} failed: {}", path, attempt, message);
                    thread::sleep(Duration::from_millis(self.retry_delay_ms));
                }
                Err(ClientError::Fetch(message)) => {
                    return Err(ClientError::Fetch(format!(
                        "{} (after {} attempts)",
                        message,
                        attempt + 1
                    )));
                }
                other => return other,
            }
        }
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder, default_message: &str) -> ClientResult<T> {
        let response = request
            .send()
            .map_err(|err| ClientError::Fetch(format!("Request failed: {}", err)))?;

        let status = response.status();

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_response_bytes {
                return Err(ClientError::Fetch(format!(
                    "Response too large ({} bytes > {} bytes)",
                    content_length, self.max_response_bytes
                )));
            }
        }

        let body = response
            .text()
            .map_err(|err| ClientError::Fetch(format!("Failed to read response body: {}", err)))?;

        if body.len() > self.max_response_bytes {
            return Err(ClientError::Fetch(format!(
                "Response too large ({} bytes > {} bytes)",
                body.len(),
                self.max_response_bytes
            )));
        }

        match decode_envelope(&body, default_message) {
            Err(ClientError::Fetch(_)) if !status.is_success() => Err(ClientError::Fetch(format!(
                "Request failed with HTTP status {}",
                status
            ))),
            decoded => decoded,
        }
    }
}

impl ClinicApi for HttpClinicApi {
    fn calendar_data(&self, month: u32, year: i32) -> ClientResult<Vec<Appointment>> {
        let response: CalendarDataResponse = self.get_with_retry(
            "calendar-data",
            |request| request.query(&[("month", month.to_string()), ("year", year.to_string())]),
            "Error obteniendo datos del calendario",
        )?;
        log::info!(
            "Fetched {} appointments for {:02}/{}",
            response.appointments.len(),
            month,
            year
        );
        Ok(response.appointments)
    }

    fn dashboard_data(&self) -> ClientResult<DashboardData> {
        self.get_with_retry("dashboard-data", |request| request, "Error obteniendo datos")
    }

    fn schedule_data(&self) -> ClientResult<Vec<ScheduleEntry>> {
        let response: ScheduleDataResponse =
            self.get_with_retry("schedule-data", |request| request, "Error obteniendo horarios")?;
        Ok(response.schedules)
    }

    fn save_schedule(&self, schedules: &[ScheduleEntry]) -> ClientResult<Option<String>> {
        let request = self
            .client
            .post(self.endpoint("save-schedule"))
            .json(&json!({ "schedules": schedules }));
        let response: SaveScheduleResponse = self.send(request, "Error guardando horario")?;
        Ok(response.message)
    }
}
