// Dashboard module
// Snapshot returned by the dashboard-data endpoint

use serde::{Deserialize, Serialize};

use super::appointment::{deserialize_appointment_list, deserialize_id, parse_calendar_date, Appointment};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub user_info: UserInfo,
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default, deserialize_with = "deserialize_appointment_list")]
    pub today_appointments: Vec<Appointment>,
    #[serde(default)]
    pub recent_patients: Vec<Patient>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub initial: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub today_appointments_count: u32,
    pub total_patients: u32,
    pub pending_records: u32,
    pub completed_today: u32,
    pub week_appointments: u32,
}

/// A recently seen patient (the pet, not its owner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub last_visit: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Patient {
    /// Uppercased first letter of the name, if any.
    pub fn initial(&self) -> Option<String> {
        self.name
            .as_deref()
            .and_then(|name| name.trim().chars().next())
            .map(|first| first.to_uppercase().collect())
    }

    /// Date of the last visit when the backend value is parseable.
    pub fn last_visit_date(&self) -> Option<chrono::NaiveDate> {
        self.last_visit.as_deref().and_then(parse_calendar_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_deserialize_dashboard_payload() {
        let json = r#"{
            "success": true,
            "user_info": {"name": "Laura Gómez", "initial": "L"},
            "stats": {"today_appointments_count": 4, "total_patients": 120,
                      "pending_records": 2, "completed_today": 1},
            "today_appointments": [
                {"id": "1", "appointment_date": "2025-01-15", "appointment_time": "09:00"}
            ],
            "recent_patients": [
                {"id": 7, "name": "luna", "species": "Gato", "age": 3,
                 "last_visit": "2025-01-10T15:00:00"}
            ]
        }"#;

        let data: DashboardData = serde_json::from_str(json).unwrap();
        assert_eq!(data.user_info.name.as_deref(), Some("Laura Gómez"));
        assert_eq!(data.stats.total_patients, 120);
        assert_eq!(data.stats.week_appointments, 0);
        assert_eq!(data.today_appointments.len(), 1);

        let patient = &data.recent_patients[0];
        assert_eq!(patient.id, "7");
        assert_eq!(patient.initial().as_deref(), Some("L"));
        assert_eq!(
            patient.last_visit_date(),
            NaiveDate::from_ymd_opt(2025, 1, 10)
        );
    }

    #[test]
    fn test_malformed_today_appointment_is_skipped() {
        let json = r#"{"today_appointments": [
            {"id": "ok", "appointment_date": "2025-01-15", "appointment_time": "09:00"},
            {"id": "no-time", "appointment_date": "2025-01-15"}
        ]}"#;
        let data: DashboardData = serde_json::from_str(json).unwrap();
        assert_eq!(data.today_appointments.len(), 1);
        assert_eq!(data.today_appointments[0].id, "ok");
    }

    #[test]
    fn test_missing_sections_default() {
        let data: DashboardData = serde_json::from_str("{}").unwrap();
        assert_eq!(data, DashboardData::default());
    }

    #[test]
    fn test_patient_without_name_has_no_initial() {
        let patient: Patient = serde_json::from_str(r#"{"id": "p1", "name": "  "}"#).unwrap();
        assert!(patient.initial().is_none());
    }
}
