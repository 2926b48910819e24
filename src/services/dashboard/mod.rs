//! Dashboard snapshot loading and periodic refresh.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};

use crate::models::dashboard::DashboardData;
use crate::models::settings::MAX_REFRESH_MINUTES;
use crate::services::api::{ClientResult, ClinicApi};

/// Whether a reload is user-initiated or a silent background refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Show a loading indicator while fetching.
    Foreground,
    /// Timer-driven; no loading indicator.
    Background,
}

impl RefreshMode {
    pub fn shows_loading(&self) -> bool {
        matches!(self, RefreshMode::Foreground)
    }
}

/// Fixed-interval timer polled with an explicit clock.
#[derive(Debug, Clone)]
pub struct RefreshTimer {
    interval: Duration,
    next_due: Option<DateTime<Utc>>,
}

impl RefreshTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::seconds(1)),
            next_due: None,
        }
    }

    /// Interval clamped to 1 minute .. one day.
    pub fn every_minutes(minutes: u64) -> Self {
        let minutes = minutes.clamp(1, MAX_REFRESH_MINUTES) as i64;
        Self::new(Duration::try_minutes(minutes).unwrap_or_else(|| Duration::days(1)))
    }

    /// Arm the timer; the first tick is one interval after `now`.
    pub fn start_at(&mut self, now: DateTime<Utc>) {
        self.next_due = Some(now + self.interval);
    }

    /// True when the timer fired. Re-arms relative to `now` so a long pause
    /// produces a single tick, not a burst.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            Some(_) => false,
            None => {
                self.start_at(now);
                false
            }
        }
    }

    pub fn time_until_due(&self, now: DateTime<Utc>) -> StdDuration {
        match self.next_due {
            Some(due) if due > now => (due - now).to_std().unwrap_or_else(|_| StdDuration::from_secs(0)),
            Some(_) => StdDuration::from_secs(0),
            None => self.interval.to_std().unwrap_or_else(|_| StdDuration::from_secs(60)),
        }
    }
}

pub struct DashboardService<A: ClinicApi> {
    api: A,
    snapshot: Option<DashboardData>,
    timer: RefreshTimer,
    latest_token: u64,
}

impl<A: ClinicApi> DashboardService<A> {
    pub fn new(api: A, refresh_minutes: u64) -> Self {
        Self {
            api,
            snapshot: None,
            timer: RefreshTimer::every_minutes(refresh_minutes),
            latest_token: 0,
        }
    }

    /// Last successfully loaded snapshot.
    pub fn snapshot(&self) -> Option<&DashboardData> {
        self.snapshot.as_ref()
    }

    pub fn timer(&self) -> &RefreshTimer {
        &self.timer
    }

    pub fn begin_load(&mut self) -> u64 {
        self.latest_token += 1;
        self.latest_token
    }

    /// Apply a response. Stale tokens are ignored; failures keep the previous
    /// snapshot on screen and are returned.
    pub fn complete_load(&mut self, token: u64, result: ClientResult<DashboardData>) -> ClientResult<bool> {
        if token != self.latest_token {
            log::warn!(
                "Discarding stale dashboard response (token {}, latest {})",
                token,
                self.latest_token
            );
            return Ok(false);
        }

        match result {
            Ok(data) => {
                log::info!(
                    "Dashboard loaded: {} appointments today, {} recent patients",
                    data.today_appointments.len(),
                    data.recent_patients.len()
                );
                self.snapshot = Some(data);
                Ok(true)
            }
            Err(err) => {
                log::error!("Error loading dashboard: {}", err);
                Err(err)
            }
        }
    }

    pub fn load(&mut self, mode: RefreshMode) -> ClientResult<&DashboardData> {
        log::debug!("Loading dashboard ({:?})", mode);
        let token = self.begin_load();
        let result = self.api.dashboard_data();
        self.complete_load(token, result)?;
        self.snapshot
            .as_ref()
            .ok_or_else(|| crate::services::api::ClientError::Fetch("Dashboard snapshot missing".to_string()))
    }

    /// Start the auto-refresh timer.
    pub fn start_auto_refresh(&mut self, now: DateTime<Utc>) {
        self.timer.start_at(now);
    }

    /// Run a background refresh if the timer is due. `None` when nothing ran.
    pub fn poll_at(&mut self, now: DateTime<Utc>) -> Option<ClientResult<()>> {
        if !self.timer.tick_at(now) {
            return None;
        }
        Some(self.load(RefreshMode::Background).map(|_| ()))
    }
}
