//! Date and hour buckets over a fetched appointment set.

use chrono::NaiveDate;

use crate::models::appointment::Appointment;

/// Appointments on `date`, ordered by start time.
///
/// The sort is stable: equal times keep backend order, unparseable times go last.
pub fn on_date(appointments: &[Appointment], date: NaiveDate) -> Vec<&Appointment> {
    let mut bucket: Vec<&Appointment> = appointments
        .iter()
        .filter(|appointment| appointment.appointment_date == date)
        .collect();
    bucket.sort_by_key(|appointment| match appointment.start_time() {
        Some(time) => (0, Some(time)),
        None => (1, None),
    });
    bucket
}

/// Appointments on `date` whose hour component is `hour`.
pub fn on_date_hour(appointments: &[Appointment], date: NaiveDate, hour: u32) -> Vec<&Appointment> {
    on_date(appointments, date)
        .into_iter()
        .filter(|appointment| appointment.hour() == Some(hour))
        .collect()
}
