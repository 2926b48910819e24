//! View models for the dashboard and the working-hours editor.
//!
//! These carry already-localized text so every renderer shows the same
//! fallbacks.

use chrono::Weekday;

use super::actions::Action;
use super::labels::Labels;
use crate::models::appointment::Appointment;
use crate::models::dashboard::{DashboardData, Patient};
use crate::models::schedule::DaySchedule;
use crate::services::schedule::{AppointmentCounts, ScheduleEditor, ScheduleSummary};
use crate::services::api::ClinicApi;

/// Placeholder shown instead of an initial for unnamed patients.
pub const PATIENT_PLACEHOLDER: &str = "🐕";

#[derive(Debug, Clone, PartialEq)]
pub struct EmptyState {
    pub message: String,
    pub link_text: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: String,
    pub value: u32,
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentRow {
    pub id: String,
    pub time: String,
    pub pet_name: String,
    pub owner_line: String,
    pub reason: String,
    pub status_text: String,
    pub status_class: &'static str,
    pub actions: Vec<Action>,
}

impl AppointmentRow {
    pub fn new(appointment: &Appointment, labels: &Labels) -> Self {
        let mut actions = vec![Action::ViewAppointment(appointment.id.clone())];
        if appointment.status.is_editable() {
            actions.push(Action::EditAppointment(appointment.id.clone()));
        }

        Self {
            id: appointment.id.clone(),
            time: appointment.appointment_time.clone(),
            pet_name: appointment.pet_name_or(labels.dashboard_pet).to_string(),
            owner_line: format!(
                "{}: {}",
                labels.owner_prefix,
                appointment.owner_name_or(labels.unspecified)
            ),
            reason: appointment.reason_or(labels.general_consultation).to_string(),
            status_text: labels.status_text(&appointment.status).to_string(),
            status_class: appointment.status.style_class(),
            actions,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatientCard {
    pub id: String,
    pub initial: String,
    pub photo_url: Option<String>,
    pub name: String,
    pub species_line: String,
    pub age: String,
    pub last_visit: String,
    /// Clicking the card opens the patient; the button opens the history.
    pub open: Action,
    pub history: Action,
}

impl PatientCard {
    pub fn new(patient: &Patient, labels: &Labels) -> Self {
        let species = non_blank(patient.species.as_deref()).unwrap_or(labels.unspecified);
        let species_line = match non_blank(patient.breed.as_deref()) {
            Some(breed) => format!("{} - {}", species, breed),
            None => species.to_string(),
        };

        // A zero age reads as not recorded.
        let age = match patient.age {
            Some(age) if age > 0 => format!("{} {}", age, labels.age_suffix),
            _ => labels.age_unknown.to_string(),
        };

        let last_visit = match (patient.last_visit_date(), non_blank(patient.last_visit.as_deref())) {
            (Some(date), _) => date.format(labels.date_format).to_string(),
            (None, Some(raw)) => raw.to_string(),
            (None, None) => labels.never_visited.to_string(),
        };

        Self {
            id: patient.id.clone(),
            initial: patient
                .initial()
                .unwrap_or_else(|| PATIENT_PLACEHOLDER.to_string()),
            photo_url: non_blank(patient.photo_url.as_deref()).map(str::to_string),
            name: non_blank(patient.name.as_deref())
                .unwrap_or(labels.unnamed_pet)
                .to_string(),
            species_line,
            age,
            last_visit,
            open: Action::ViewPatient(patient.id.clone()),
            history: Action::PatientHistory(patient.id.clone()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    Items(Vec<T>),
    Empty(EmptyState),
}

impl<T> Listing<T> {
    pub fn len(&self) -> usize {
        match self {
            Listing::Items(items) => items.len(),
            Listing::Empty(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Only set when the backend knows the user's name.
    pub welcome_title: Option<String>,
    pub user_name: Option<String>,
    pub user_initial: Option<String>,
    pub stats: Vec<StatCard>,
    pub appointments: Listing<AppointmentRow>,
    pub patients: Listing<PatientCard>,
}

impl DashboardView {
    pub fn build(data: &DashboardData, labels: &Labels) -> Self {
        let name = non_blank(data.user_info.name.as_deref());

        let stats = vec![
            StatCard {
                label: labels.stat_today.to_string(),
                value: data.stats.today_appointments_count,
                action: Some(Action::OpenCalendar),
            },
            StatCard {
                label: labels.stat_patients.to_string(),
                value: data.stats.total_patients,
                action: Some(Action::OpenPatients),
            },
            StatCard {
                label: labels.stat_pending.to_string(),
                value: data.stats.pending_records,
                action: None,
            },
            StatCard {
                label: labels.stat_completed.to_string(),
                value: data.stats.completed_today,
                action: Some(Action::OpenCalendar),
            },
        ];

        let appointments = if data.today_appointments.is_empty() {
            Listing::Empty(EmptyState {
                message: labels.no_appointments_today.to_string(),
                link_text: labels.view_full_calendar.to_string(),
                action: Action::OpenCalendar,
            })
        } else {
            Listing::Items(
                data.today_appointments
                    .iter()
                    .map(|appointment| AppointmentRow::new(appointment, labels))
                    .collect(),
            )
        };

        let patients = if data.recent_patients.is_empty() {
            Listing::Empty(EmptyState {
                message: labels.no_recent_patients.to_string(),
                link_text: labels.view_all_patients.to_string(),
                action: Action::OpenPatients,
            })
        } else {
            Listing::Items(
                data.recent_patients
                    .iter()
                    .map(|patient| PatientCard::new(patient, labels))
                    .collect(),
            )
        };

        Self {
            welcome_title: name.map(|name| labels.welcome(name)),
            user_name: name.map(str::to_string),
            user_initial: non_blank(data.user_info.initial.as_deref()).map(str::to_string),
            stats,
            appointments,
            patients,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDayRow {
    pub weekday: Weekday,
    pub name: String,
    pub active: bool,
    pub start_time: String,
    pub end_time: String,
    pub break_start: String,
    pub break_end: String,
    pub hours_line: String,
    pub total_line: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleView {
    pub loaded: bool,
    pub empty_message: Option<String>,
    pub days: Vec<ScheduleDayRow>,
    pub working_days: String,
    pub weekly_hours: String,
    pub daily_average: String,
    pub counts: Option<AppointmentCounts>,
}

impl ScheduleView {
    pub fn build<A: ClinicApi>(
        editor: &ScheduleEditor<A>,
        counts: Option<AppointmentCounts>,
        labels: &Labels,
    ) -> Self {
        let days = editor
            .days()
            .map(|(weekday, day)| day_row(weekday, day, editor.day_hours(weekday), labels))
            .collect();
        let ScheduleSummary {
            working_days,
            total_hours,
            daily_average,
        } = editor.summary();

        Self {
            loaded: editor.is_loaded(),
            empty_message: (!editor.is_loaded()).then(|| labels.no_schedule.to_string()),
            days,
            working_days: working_days.to_string(),
            weekly_hours: format!("{:.1}h", total_hours),
            daily_average: format!("{:.1}h", daily_average),
            counts,
        }
    }
}

fn day_row(weekday: Weekday, day: &DaySchedule, hours: f64, labels: &Labels) -> ScheduleDayRow {
    ScheduleDayRow {
        weekday,
        name: labels.weekday_name(weekday).to_string(),
        active: day.active,
        start_time: day.start_time.clone(),
        end_time: day.end_time.clone(),
        break_start: day.break_start.clone(),
        break_end: day.break_end.clone(),
        hours_line: format!("{}: {} - {}", labels.schedule_prefix, day.start_time, day.end_time),
        total_line: format!("{:.1} {}", hours, labels.hours_suffix),
    }
}
