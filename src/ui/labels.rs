// Display texts for the supported locales

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::appointment::AppointmentStatus;
use crate::models::settings::Locale;
use crate::models::view::Granularity;
use crate::utils::date::{week_end, week_start};

/// Every user-facing string the console prints.
#[derive(Debug)]
pub struct Labels {
    pub month_names: [&'static str; 12],
    /// Short day names, Sunday first.
    pub day_names: [&'static str; 7],
    /// Full day names, Monday first.
    pub weekday_names: [&'static str; 7],
    pub status_scheduled: &'static str,
    pub status_confirmed: &'static str,
    pub status_in_progress: &'static str,
    pub status_completed: &'static str,
    pub status_cancelled: &'static str,
    pub status_no_show: &'static str,
    pub hour_header: &'static str,
    pub more_suffix: &'static str,
    pub unnamed_pet: &'static str,
    pub dashboard_pet: &'static str,
    pub unspecified: &'static str,
    pub general_consultation: &'static str,
    pub owner_prefix: &'static str,
    pub welcome_prefix: &'static str,
    pub age_suffix: &'static str,
    pub age_unknown: &'static str,
    pub never_visited: &'static str,
    pub no_appointments_today: &'static str,
    pub view_full_calendar: &'static str,
    pub no_recent_patients: &'static str,
    pub view_all_patients: &'static str,
    pub no_schedule: &'static str,
    pub hours_suffix: &'static str,
    pub inactive_day: &'static str,
    pub calendar_load_error: &'static str,
    pub dashboard_load_error: &'static str,
    pub schedule_load_error: &'static str,
    pub schedule_save_error: &'static str,
    pub schedule_saved: &'static str,
    pub default_hours_set: &'static str,
    pub invalid_time: &'static str,
    pub loading: &'static str,
    pub new_appointment: &'static str,
    pub stat_today: &'static str,
    pub stat_patients: &'static str,
    pub stat_pending: &'static str,
    pub stat_completed: &'static str,
    pub working_days: &'static str,
    pub weekly_hours: &'static str,
    pub daily_average: &'static str,
    pub schedule_prefix: &'static str,
    pub week_appointments: &'static str,
    /// `chrono` format for short dates.
    pub date_format: &'static str,
}

pub static SPANISH: Labels = Labels {
    month_names: [
        "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio", "Julio", "Agosto", "Septiembre",
        "Octubre", "Noviembre", "Diciembre",
    ],
    day_names: ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"],
    weekday_names: [
        "Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado", "Domingo",
    ],
    status_scheduled: "Programada",
    status_confirmed: "Confirmada",
    status_in_progress: "En Progreso",
    status_completed: "Completada",
    status_cancelled: "Cancelada",
    status_no_show: "No Asistió",
    hour_header: "Hora",
    more_suffix: "más",
    unnamed_pet: "Sin nombre",
    dashboard_pet: "Mascota",
    unspecified: "No especificado",
    general_consultation: "Consulta general",
    owner_prefix: "Propietario",
    welcome_prefix: "¡Bienvenido, Dr.",
    age_suffix: "años",
    age_unknown: "Edad no registrada",
    never_visited: "No registrado",
    no_appointments_today: "No tienes citas programadas para hoy",
    view_full_calendar: "Ver calendario completo",
    no_recent_patients: "No hay pacientes recientes",
    view_all_patients: "Ver todos los pacientes",
    no_schedule: "No se pudieron cargar los horarios",
    hours_suffix: "horas",
    inactive_day: "No laborable",
    calendar_load_error: "Error cargando los datos del calendario",
    dashboard_load_error: "Error cargando los datos del dashboard",
    schedule_load_error: "Error cargando los horarios",
    schedule_save_error: "Error guardando el horario",
    schedule_saved: "Horario guardado exitosamente",
    default_hours_set: "Horarios por defecto establecidos",
    invalid_time: "Hora inválida",
    loading: "Cargando...",
    new_appointment: "Nueva cita",
    stat_today: "Citas de hoy",
    stat_patients: "Pacientes totales",
    stat_pending: "Historias pendientes",
    stat_completed: "Completadas hoy",
    working_days: "Días laborables",
    weekly_hours: "Horas semanales",
    daily_average: "Promedio diario",
    schedule_prefix: "Horario",
    week_appointments: "Citas esta semana",
    date_format: "%d/%m/%Y",
};

pub static ENGLISH: Labels = Labels {
    month_names: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    day_names: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    weekday_names: [
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ],
    status_scheduled: "Scheduled",
    status_confirmed: "Confirmed",
    status_in_progress: "In Progress",
    status_completed: "Completed",
    status_cancelled: "Cancelled",
    status_no_show: "No Show",
    hour_header: "Hour",
    more_suffix: "more",
    unnamed_pet: "Unnamed",
    dashboard_pet: "Pet",
    unspecified: "Not specified",
    general_consultation: "General consultation",
    owner_prefix: "Owner",
    welcome_prefix: "Welcome, Dr.",
    age_suffix: "years",
    age_unknown: "Age not recorded",
    never_visited: "Not recorded",
    no_appointments_today: "You have no appointments scheduled for today",
    view_full_calendar: "View full calendar",
    no_recent_patients: "No recent patients",
    view_all_patients: "View all patients",
    no_schedule: "The schedule could not be loaded",
    hours_suffix: "hours",
    inactive_day: "Day off",
    calendar_load_error: "Error loading calendar data",
    dashboard_load_error: "Error loading dashboard data",
    schedule_load_error: "Error loading the schedule",
    schedule_save_error: "Error saving the schedule",
    schedule_saved: "Schedule saved",
    default_hours_set: "Default hours applied",
    invalid_time: "Invalid time",
    loading: "Loading...",
    new_appointment: "New appointment",
    stat_today: "Today's appointments",
    stat_patients: "Total patients",
    stat_pending: "Pending records",
    stat_completed: "Completed today",
    working_days: "Working days",
    weekly_hours: "Weekly hours",
    daily_average: "Daily average",
    schedule_prefix: "Hours",
    week_appointments: "Appointments this week",
    date_format: "%m/%d/%Y",
};

impl Labels {
    pub fn for_locale(locale: Locale) -> &'static Labels {
        match locale {
            Locale::Es => &SPANISH,
            Locale::En => &ENGLISH,
        }
    }

    pub fn month_name(&self, month: u32) -> &'static str {
        let index = month.clamp(1, 12) as usize - 1;
        self.month_names[index]
    }

    pub fn short_day_name(&self, weekday: Weekday) -> &'static str {
        self.day_names[weekday.num_days_from_sunday() as usize]
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &'static str {
        self.weekday_names[weekday.num_days_from_monday() as usize]
    }

    /// Status text; unknown statuses read as scheduled.
    pub fn status_text(&self, status: &AppointmentStatus) -> &'static str {
        match status.displayed() {
            AppointmentStatus::Confirmed => self.status_confirmed,
            AppointmentStatus::InProgress => self.status_in_progress,
            AppointmentStatus::Completed => self.status_completed,
            AppointmentStatus::Cancelled => self.status_cancelled,
            AppointmentStatus::NoShow => self.status_no_show,
            AppointmentStatus::Scheduled | AppointmentStatus::Unrecognized(_) => self.status_scheduled,
        }
    }

    /// Header title for the calendar. The week title uses the month of the
    /// focused date even when the week spans two months.
    pub fn calendar_title(&self, granularity: Granularity, focused: NaiveDate) -> String {
        let month = self.month_name(focused.month());
        match granularity {
            Granularity::Month => format!("{} {}", month, focused.year()),
            Granularity::Week => format!(
                "{} - {} {} {}",
                week_start(focused).day(),
                week_end(focused).day(),
                month,
                focused.year()
            ),
            Granularity::Day => format!("{} {} {}", focused.day(), month, focused.year()),
        }
    }

    pub fn overflow(&self, hidden: usize) -> String {
        format!("+{} {}", hidden, self.more_suffix)
    }

    pub fn invalid_time_message(&self, value: &str) -> String {
        format!("{} '{}' (HH:MM)", self.invalid_time, value)
    }

    pub fn welcome(&self, name: &str) -> String {
        format!("{} {}!", self.welcome_prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_case(Granularity::Month, date(2025, 1, 15) => "Enero 2025" ; "month")]
    #[test_case(Granularity::Week, date(2025, 1, 1) => "29 - 4 Enero 2025" ; "week across years")]
    #[test_case(Granularity::Day, date(2025, 1, 15) => "15 Enero 2025" ; "day")]
    fn test_spanish_titles(granularity: Granularity, focused: NaiveDate) -> String {
        SPANISH.calendar_title(granularity, focused)
    }

    #[test]
    fn test_unknown_status_reads_as_scheduled() {
        let status = AppointmentStatus::Unrecognized("rescheduled".to_string());
        assert_eq!(SPANISH.status_text(&status), "Programada");
        assert_eq!(SPANISH.status_text(&AppointmentStatus::NoShow), "No Asistió");
    }

    #[test]
    fn test_day_names() {
        assert_eq!(SPANISH.short_day_name(Weekday::Sun), "Dom");
        assert_eq!(SPANISH.weekday_name(Weekday::Wed), "Miércoles");
        assert_eq!(ENGLISH.weekday_name(Weekday::Sun), "Sunday");
    }

    #[test]
    fn test_welcome_and_overflow() {
        assert_eq!(SPANISH.welcome("Pérez"), "¡Bienvenido, Dr. Pérez!");
        assert_eq!(SPANISH.overflow(2), "+2 más");
        assert_eq!(Labels::for_locale(Locale::En).overflow(4), "+4 more");
    }

    #[test]
    fn test_invalid_time_message_is_localized() {
        assert_eq!(SPANISH.invalid_time_message("9h"), "Hora inválida '9h' (HH:MM)");
        assert_eq!(ENGLISH.invalid_time_message("25:00"), "Invalid time '25:00' (HH:MM)");
    }
}
