//! Typed user actions and the name-to-handler registry used by clickable
//! elements (stat cards, empty states, appointment buttons).

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::view::{Direction, Granularity};
use crate::utils::date::{hour_slot, parse_hour};

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ViewAppointment(String),
    EditAppointment(String),
    StartConsultation(String),
    NewAppointment { date: NaiveDate, hour: u32 },
    ViewPatient(String),
    PatientHistory(String),
    OpenCalendar,
    OpenPatients,
    SelectDate(NaiveDate),
    SetView(Granularity),
    Navigate(Direction),
    Today,
}

impl Action {
    /// Page to open for actions that leave the current screen.
    pub fn redirect(&self) -> Option<Redirect> {
        let path = match self {
            Action::ViewAppointment(id) => format!("/veterinarian/appointments/{}", segment(id)),
            Action::EditAppointment(id) => format!("/veterinarian/appointments/{}/edit", segment(id)),
            Action::StartConsultation(id) => format!(
                "/veterinarian/medical-records/new?appointment_id={}",
                segment(id)
            ),
            Action::NewAppointment { date, hour } => format!(
                "/veterinarian/appointments/new?date={}&time={}",
                date.format("%Y-%m-%d"),
                urlencoding::encode(&hour_slot(*hour))
            ),
            Action::ViewPatient(id) => format!("/veterinarian/patients/{}", segment(id)),
            Action::PatientHistory(id) => format!("/veterinarian/patients/{}/history", segment(id)),
            Action::OpenCalendar => "/veterinarian/calendar".to_string(),
            Action::OpenPatients => "/veterinarian/patients".to_string(),
            Action::SelectDate(_) | Action::SetView(_) | Action::Navigate(_) | Action::Today => {
                return None
            }
        };
        Some(Redirect { path })
    }
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// A site-relative page location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    path: String,
}

impl Redirect {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Absolute URL under `base`.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path)
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Unknown action '{0}'")]
    Unknown(String),

    #[error("Action '{action}' is missing argument {index}")]
    MissingArgument { action: String, index: usize },

    #[error("Action '{action}' got an invalid argument '{value}'")]
    InvalidArgument { action: String, value: String },
}

pub type Handler = Box<dyn Fn(&str, &[&str]) -> Result<Action, ActionError>>;

/// Explicit registry of named actions. Elements carry a name and string
/// arguments; nothing is evaluated.
pub struct ActionRouter {
    handlers: HashMap<String, Handler>,
}

impl Default for ActionRouter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn arg<'a>(action: &str, args: &[&'a str], index: usize) -> Result<&'a str, ActionError> {
    args.get(index)
        .copied()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ActionError::MissingArgument {
            action: action.to_string(),
            index,
        })
}

fn id_action(build: fn(String) -> Action) -> Handler {
    Box::new(move |name, args| Ok(build(arg(name, args, 0)?.to_string())))
}

fn invalid(action: &str, value: &str) -> ActionError {
    ActionError::InvalidArgument {
        action: action.to_string(),
        value: value.to_string(),
    }
}

impl ActionRouter {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut router = Self::empty();
        router.register("view_appointment", id_action(Action::ViewAppointment));
        router.register("edit_appointment", id_action(Action::EditAppointment));
        router.register("start_consultation", id_action(Action::StartConsultation));
        router.register("view_patient", id_action(Action::ViewPatient));
        router.register("view_patient_history", id_action(Action::PatientHistory));
        router.register("open_calendar", Box::new(|_, _| Ok(Action::OpenCalendar)));
        router.register("open_patients", Box::new(|_, _| Ok(Action::OpenPatients)));
        router.register("today", Box::new(|_, _| Ok(Action::Today)));
        router.register(
            "new_appointment",
            Box::new(|name, args| {
                let date_arg = arg(name, args, 0)?;
                let date = NaiveDate::parse_from_str(date_arg, "%Y-%m-%d")
                    .map_err(|_| invalid(name, date_arg))?;
                let hour_arg = arg(name, args, 1)?;
                let hour = parse_hour(hour_arg).ok_or_else(|| invalid(name, hour_arg))?;
                Ok(Action::NewAppointment { date, hour })
            }),
        );
        router.register(
            "select_date",
            Box::new(|name, args| {
                let value = arg(name, args, 0)?;
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map(Action::SelectDate)
                    .map_err(|_| invalid(name, value))
            }),
        );
        router.register(
            "set_view",
            Box::new(|name, args| {
                let value = arg(name, args, 0)?;
                value
                    .parse::<Granularity>()
                    .map(Action::SetView)
                    .map_err(|_| invalid(name, value))
            }),
        );
        router.register(
            "navigate",
            Box::new(|name, args| match arg(name, args, 0)? {
                "prev" | "previous" | "back" => Ok(Action::Navigate(Direction::Backward)),
                "next" | "forward" => Ok(Action::Navigate(Direction::Forward)),
                other => Err(invalid(name, other)),
            }),
        );
        router
    }

    pub fn register(&mut self, name: impl Into<String>, handler: Handler) {
        self.handlers.insert(name.into(), handler);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn dispatch(&self, name: &str, args: &[&str]) -> Result<Action, ActionError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| ActionError::Unknown(name.to_string()))?;
        handler(name, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_case(Action::ViewAppointment("42".into()) => "/veterinarian/appointments/42" ; "view")]
    #[test_case(Action::EditAppointment("42".into()) => "/veterinarian/appointments/42/edit" ; "edit")]
    #[test_case(Action::StartConsultation("42".into()) => "/veterinarian/medical-records/new?appointment_id=42" ; "consultation")]
    #[test_case(Action::NewAppointment { date: date(2025, 1, 15), hour: 9 } => "/veterinarian/appointments/new?date=2025-01-15&time=09%3A00" ; "new appointment")]
    #[test_case(Action::PatientHistory("p 1".into()) => "/veterinarian/patients/p%201/history" ; "encoded id")]
    #[test_case(Action::OpenPatients => "/veterinarian/patients" ; "patients")]
    fn test_redirect_paths(action: Action) -> String {
        action.redirect().unwrap().path().to_string()
    }

    #[test]
    fn test_state_actions_do_not_redirect() {
        assert!(Action::SetView(Granularity::Week).redirect().is_none());
        assert!(Action::Today.redirect().is_none());
    }

    #[test]
    fn test_redirect_url_joins_base() {
        let redirect = Action::OpenCalendar.redirect().unwrap();
        assert_eq!(
            redirect.url("https://clinic.example/"),
            "https://clinic.example/veterinarian/calendar"
        );
    }

    #[test]
    fn test_dispatch_known_actions() {
        let router = ActionRouter::with_defaults();
        assert_eq!(
            router.dispatch("view_appointment", &["7"]),
            Ok(Action::ViewAppointment("7".to_string()))
        );
        assert_eq!(
            router.dispatch("new_appointment", &["2025-03-01", "14:00"]),
            Ok(Action::NewAppointment { date: date(2025, 3, 1), hour: 14 })
        );
        assert_eq!(
            router.dispatch("set_view", &["day"]),
            Ok(Action::SetView(Granularity::Day))
        );
        assert_eq!(router.dispatch("open_calendar", &[]), Ok(Action::OpenCalendar));
    }

    #[test]
    fn test_dispatch_rejects_unknown_and_bad_arguments() {
        let router = ActionRouter::with_defaults();
        assert_eq!(
            router.dispatch("alert(1)", &[]),
            Err(ActionError::Unknown("alert(1)".to_string()))
        );
        assert!(matches!(
            router.dispatch("edit_appointment", &[]),
            Err(ActionError::MissingArgument { index: 0, .. })
        ));
        assert!(matches!(
            router.dispatch("select_date", &["15/01/2025"]),
            Err(ActionError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_custom_handler() {
        let mut router = ActionRouter::empty();
        router.register("stat_pending", Box::new(|_, _| Ok(Action::OpenPatients)));
        assert!(router.contains("stat_pending"));
        assert!(!router.contains("view_appointment"));
        assert_eq!(router.dispatch("stat_pending", &[]), Ok(Action::OpenPatients));
    }
}
