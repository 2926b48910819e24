// Appointment module
// Appointment records as delivered by the clinic backend

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::utils::date::{parse_clock_time, parse_hour};

/// A booked appointment. Read-only to the calendar: no field is ever
/// rewritten, unknown type/status values included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(
        deserialize_with = "deserialize_calendar_date",
        serialize_with = "serialize_calendar_date"
    )]
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    #[serde(default)]
    pub appointment_type: AppointmentType,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub pet_name: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub pet_species: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Appointment {
    /// Create an appointment with the required fields; display strings start empty.
    pub fn new(
        id: impl Into<String>,
        appointment_date: NaiveDate,
        appointment_time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            appointment_date,
            appointment_time: appointment_time.into(),
            appointment_type: AppointmentType::default(),
            status: AppointmentStatus::default(),
            pet_name: None,
            owner_name: None,
            pet_species: None,
            reason: None,
        }
    }

    /// Hour bucket of the appointment, parsed from `appointment_time`.
    pub fn hour(&self) -> Option<u32> {
        parse_hour(&self.appointment_time)
    }

    /// Parsed start time, used for ordering inside a bucket.
    pub fn start_time(&self) -> Option<NaiveTime> {
        parse_clock_time(&self.appointment_time)
    }

    /// Pet name unless absent or blank.
    pub fn pet_name(&self) -> Option<&str> {
        non_blank(&self.pet_name)
    }

    pub fn pet_name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.pet_name().unwrap_or(fallback)
    }

    pub fn owner_name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_blank(&self.owner_name).unwrap_or(fallback)
    }

    pub fn pet_species_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_blank(&self.pet_species).unwrap_or(fallback)
    }

    pub fn reason_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_blank(&self.reason).unwrap_or(fallback)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Kind of visit. Values the frontend does not know are kept verbatim in
/// `Unrecognized` and styled as a consultation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppointmentType {
    #[default]
    Consultation,
    Surgery,
    Vaccination,
    Emergency,
    Control,
    Unrecognized(String),
}

impl AppointmentType {
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentType::Consultation => "consultation",
            AppointmentType::Surgery => "surgery",
            AppointmentType::Vaccination => "vaccination",
            AppointmentType::Emergency => "emergency",
            AppointmentType::Control => "control",
            AppointmentType::Unrecognized(raw) => raw,
        }
    }

    /// Style class for renderers.
    pub fn style_class(&self) -> &'static str {
        match self {
            AppointmentType::Surgery => "surgery",
            AppointmentType::Vaccination => "vaccination",
            AppointmentType::Emergency => "emergency",
            AppointmentType::Control => "control",
            AppointmentType::Consultation | AppointmentType::Unrecognized(_) => "consultation",
        }
    }
}

impl From<String> for AppointmentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "consultation" => AppointmentType::Consultation,
            "surgery" => AppointmentType::Surgery,
            "vaccination" => AppointmentType::Vaccination,
            "emergency" => AppointmentType::Emergency,
            "control" => AppointmentType::Control,
            _ => AppointmentType::Unrecognized(value),
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AppointmentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AppointmentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(AppointmentType::from).unwrap_or_default())
    }
}

/// Lifecycle state of an appointment. Unknown values are kept and
/// displayed as `scheduled`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
    Unrecognized(String),
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
            AppointmentStatus::Unrecognized(raw) => raw,
        }
    }

    /// The status used for display: unknown values collapse to `Scheduled`.
    pub fn displayed(&self) -> AppointmentStatus {
        match self {
            AppointmentStatus::Unrecognized(_) => AppointmentStatus::Scheduled,
            known => known.clone(),
        }
    }

    pub fn style_class(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::InProgress => "in-progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
            AppointmentStatus::Scheduled | AppointmentStatus::Unrecognized(_) => "scheduled",
        }
    }

    /// Only appointments still in their initial state can be edited from the dashboard.
    pub fn is_editable(&self) -> bool {
        matches!(self, AppointmentStatus::Scheduled)
    }
}

impl From<String> for AppointmentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "scheduled" => AppointmentStatus::Scheduled,
            "confirmed" => AppointmentStatus::Confirmed,
            "in_progress" => AppointmentStatus::InProgress,
            "completed" => AppointmentStatus::Completed,
            "cancelled" => AppointmentStatus::Cancelled,
            "no_show" => AppointmentStatus::NoShow,
            _ => AppointmentStatus::Unrecognized(value),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AppointmentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(AppointmentStatus::from).unwrap_or_default())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

/// Identifiers arrive as strings or integers depending on the backend service.
pub(crate) fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

pub(crate) fn deserialize_optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

/// Decode a list of appointment records, skipping (and logging) any record
/// that does not decode instead of failing the whole list.
pub(crate) fn deserialize_appointment_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Appointment>, D::Error> {
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let total = raw.len();
    let appointments: Vec<Appointment> = raw
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Appointment>(record) {
            Ok(appointment) => Some(appointment),
            Err(err) => {
                log::warn!("Skipping malformed appointment record: {}", err);
                None
            }
        })
        .collect();
    if appointments.len() < total {
        log::warn!("Kept {} of {} appointment records", appointments.len(), total);
    }
    Ok(appointments)
}

/// Parse the date component of a backend date value.
///
/// Accepts `YYYY-MM-DD`, naive ISO date-times and RFC 3339 timestamps. The
/// date is taken as written, never shifted through another offset.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|datetime| datetime.date())
}

fn deserialize_calendar_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid appointment date '{}'", raw)))
}

fn serialize_calendar_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "apt-1",
            "appointment_date": "2025-01-15",
            "appointment_time": "09:30",
            "appointment_type": "surgery",
            "status": "confirmed",
            "pet_name": "Rocky",
            "owner_name": "Ana Pérez",
            "pet_species": "Perro",
            "reason": "Esterilización"
        }"#;

        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.id, "apt-1");
        assert_eq!(appointment.appointment_date, date(2025, 1, 15));
        assert_eq!(appointment.appointment_type, AppointmentType::Surgery);
        assert_eq!(appointment.status, AppointmentStatus::Confirmed);
        assert_eq!(appointment.hour(), Some(9));
    }

    #[test]
    fn test_deserialize_minimal_record_with_numeric_id() {
        let json = r#"{"id": 42, "appointment_date": "2025-01-15", "appointment_time": "10:00"}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.id, "42");
        assert_eq!(appointment.appointment_type, AppointmentType::Consultation);
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert!(appointment.pet_name.is_none());
    }

    #[test]
    fn test_null_type_and_status_use_defaults() {
        let json = r#"{"id": "a", "appointment_date": "2025-01-15", "appointment_time": "10:00",
                       "appointment_type": null, "status": null}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.appointment_type, AppointmentType::Consultation);
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn test_unrecognized_values_are_preserved() {
        let json = r#"{"id": "a", "appointment_date": "2025-01-15", "appointment_time": "10:00",
                       "appointment_type": "grooming", "status": "rescheduled"}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();

        assert_eq!(appointment.appointment_type.style_class(), "consultation");
        assert_eq!(appointment.appointment_type.as_str(), "grooming");
        assert_eq!(appointment.status.displayed(), AppointmentStatus::Scheduled);
        assert_eq!(appointment.status.style_class(), "scheduled");

        let round_trip = serde_json::to_value(&appointment).unwrap();
        assert_eq!(round_trip["appointment_type"], "grooming");
        assert_eq!(round_trip["status"], "rescheduled");
        assert_eq!(round_trip["appointment_date"], "2025-01-15");
    }

    #[test_case("2025-01-15" ; "date only")]
    #[test_case("2025-01-15T00:00:00" ; "naive midnight")]
    #[test_case("2025-01-15T23:30:00.000" ; "naive with fraction")]
    #[test_case("2025-01-15T23:30:00-05:00" ; "late evening with offset")]
    #[test_case("2025-01-15T00:10:00+09:00" ; "early morning with offset")]
    fn test_parse_calendar_date_keeps_written_date(value: &str) {
        assert_eq!(parse_calendar_date(value), Some(date(2025, 1, 15)));
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let json = r#"{"id": "a", "appointment_date": "15/01/2025", "appointment_time": "10:00"}"#;
        assert!(serde_json::from_str::<Appointment>(json).is_err());
    }

    #[test]
    fn test_display_fallbacks() {
        let mut appointment = Appointment::new("a", date(2025, 1, 15), "10:00");
        appointment.owner_name = Some("   ".to_string());
        appointment.reason = Some("Vacuna anual".to_string());

        assert_eq!(appointment.pet_name_or("Sin nombre"), "Sin nombre");
        assert_eq!(appointment.owner_name_or("No especificado"), "No especificado");
        assert_eq!(appointment.reason_or("Consulta general"), "Vacuna anual");
        assert_eq!(appointment.pet_species_or(""), "");
    }

    #[test_case("scheduled" => true)]
    #[test_case("confirmed" => false)]
    #[test_case("mystery" => false)]
    fn test_status_editable(raw: &str) -> bool {
        AppointmentStatus::from(raw.to_string()).is_editable()
    }
}
