//! Calendar engine: navigation state, the cached appointment period and
//! grid construction.
//!
//! Every period fetch is tagged with a request token. Only the response to the
//! most recently issued request is applied; anything older is discarded so a
//! slow answer for a month the user already left can never overwrite the
//! current one.

pub mod bucket;
pub mod grid;
pub mod navigation;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

use crate::models::appointment::Appointment;
use crate::models::settings::{RefetchPolicy, Settings};
use crate::models::view::{Direction, Granularity};
use crate::services::api::{ClientResult, ClinicApi};
use crate::utils::date::ClinicZone;

pub use grid::{build_grid, DayMarks, GridDescription};

/// Navigation position owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub focused_date: NaiveDate,
    pub granularity: Granularity,
    pub selected_date: Option<NaiveDate>,
}

/// Ticket for one period fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodRequest {
    token: u64,
    year: i32,
    month: u32,
}

impl PeriodRequest {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response replaced the cache with this many appointments.
    Applied(usize),
    /// A newer request was issued meanwhile; the response was dropped.
    Discarded,
    /// No fetch was needed because the cached month still covers the focus.
    Reused,
}

pub struct CalendarEngine<A: ClinicApi> {
    api: A,
    state: ViewState,
    appointments: Vec<Appointment>,
    /// (year, month) of the last applied successful fetch
    loaded_period: Option<(i32, u32)>,
    latest_token: u64,
    refetch_policy: RefetchPolicy,
    zone: ClinicZone,
}

impl<A: ClinicApi> CalendarEngine<A> {
    /// Create an engine focused on today in the clinic's time zone.
    pub fn new(api: A, settings: &Settings) -> Self {
        let zone = settings.clinic_zone();
        Self::with_focus(api, settings, zone.today())
    }

    pub fn with_focus(api: A, settings: &Settings, focused_date: NaiveDate) -> Self {
        Self {
            api,
            state: ViewState {
                focused_date,
                granularity: settings.default_view,
                selected_date: None,
            },
            appointments: Vec::new(),
            loaded_period: None,
            latest_token: 0,
            refetch_policy: settings.refetch_policy,
            zone: settings.clinic_zone(),
        }
    }

    pub fn focused_date(&self) -> NaiveDate {
        self.state.focused_date
    }

    pub fn granularity(&self) -> Granularity {
        self.state.granularity
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.state.selected_date
    }

    /// The cached appointments of the last applied period.
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn loaded_period(&self) -> Option<(i32, u32)> {
        self.loaded_period
    }

    pub fn today(&self) -> NaiveDate {
        self.zone.today()
    }

    /// Issue a new request token for the month containing `date`.
    pub fn begin_load(&mut self, date: NaiveDate) -> PeriodRequest {
        self.latest_token += 1;
        PeriodRequest {
            token: self.latest_token,
            year: date.year(),
            month: date.month(),
        }
    }

    /// Apply the result of a fetch if it answers the latest request.
    ///
    /// A failed current request empties the cache and returns the error.
    pub fn complete_load(
        &mut self,
        request: PeriodRequest,
        result: ClientResult<Vec<Appointment>>,
    ) -> ClientResult<LoadOutcome> {
        if request.token != self.latest_token {
            log::warn!(
                "Discarding stale calendar response for {:02}/{} (token {}, latest {})",
                request.month,
                request.year,
                request.token,
                self.latest_token
            );
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(appointments) => {
                log::info!(
                    "Loaded {} appointments for {:02}/{}",
                    appointments.len(),
                    request.month,
                    request.year
                );
                let count = appointments.len();
                self.appointments = appointments;
                self.loaded_period = Some((request.year, request.month));
                Ok(LoadOutcome::Applied(count))
            }
            Err(err) => {
                log::error!(
                    "Error loading calendar for {:02}/{}: {}",
                    request.month,
                    request.year,
                    err
                );
                self.appointments.clear();
                self.loaded_period = None;
                Err(err)
            }
        }
    }

    /// Fetch every appointment of the month containing `date`.
    pub fn load_period(&mut self, date: NaiveDate) -> ClientResult<&[Appointment]> {
        let request = self.begin_load(date);
        let result = self.api.calendar_data(request.month, request.year);
        self.complete_load(request, result)?;
        Ok(&self.appointments)
    }

    /// Reload the period around the focused date.
    pub fn refresh(&mut self) -> ClientResult<&[Appointment]> {
        self.load_period(self.state.focused_date)
    }

    /// Switch views. The cached set is reused as is.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        log::debug!("Calendar view changed to {}", granularity);
        self.state.granularity = granularity;
    }

    /// Move one unit of the current granularity and fetch the new period.
    pub fn navigate(&mut self, direction: Direction) -> ClientResult<LoadOutcome> {
        let target = navigation::step(self.state.focused_date, self.state.granularity, direction);
        log::debug!(
            "Navigating {:?} by {} from {} to {}",
            direction,
            self.state.granularity,
            self.state.focused_date,
            target
        );
        self.state.focused_date = target;

        let period = (target.year(), target.month());
        if self.refetch_policy == RefetchPolicy::OnMonthChange && self.loaded_period == Some(period) {
            return Ok(LoadOutcome::Reused);
        }

        let count = self.load_period(target)?.len();
        Ok(LoadOutcome::Applied(count))
    }

    /// Select and focus `date` without fetching.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.state.selected_date = Some(date);
        self.state.focused_date = date;
    }

    pub fn appointments_on_date(&self, date: NaiveDate) -> Vec<&Appointment> {
        bucket::on_date(&self.appointments, date)
    }

    pub fn appointments_on_date_hour(&self, date: NaiveDate, hour: u32) -> Vec<&Appointment> {
        bucket::on_date_hour(&self.appointments, date, hour)
    }

    /// Appointments on the clinic-local day of `instant`.
    pub fn appointments_on_instant<Z: TimeZone>(&self, instant: &DateTime<Z>) -> Vec<&Appointment> {
        self.appointments_on_date(self.zone.date_of(instant))
    }

    pub fn grid(&self) -> GridDescription {
        self.grid_for_today(self.today())
    }

    pub fn grid_for_today(&self, today: NaiveDate) -> GridDescription {
        build_grid(
            self.state.granularity,
            self.state.focused_date,
            &self.appointments,
            &DayMarks {
                today,
                selected: self.state.selected_date,
            },
        )
    }
}
