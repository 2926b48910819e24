//! Screen controllers. Each one owns a service and a renderer, turns user
//! actions into service calls and reports every failure as a notification.

use std::io;

use chrono::{DateTime, Utc, Weekday};

use super::actions::{Action, Redirect};
use super::labels::Labels;
use super::notifications::NotificationCenter;
use super::render::CalendarRenderer;
use super::views::{DashboardView, ScheduleView};
use crate::models::schedule::TimeField;
use crate::services::api::ClinicApi;
use crate::services::calendar::CalendarEngine;
use crate::services::dashboard::{DashboardService, RefreshMode};
use crate::services::schedule::{AppointmentCounts, ScheduleEditor, ScheduleError};

fn flush_notifications<R: CalendarRenderer>(
    renderer: &mut R,
    notifications: &mut NotificationCenter,
) -> io::Result<()> {
    notifications.cleanup();
    let pending = notifications.drain();
    if pending.is_empty() {
        return Ok(());
    }
    renderer.render_notifications(&pending)
}

pub struct CalendarScreen<A: ClinicApi, R: CalendarRenderer> {
    engine: CalendarEngine<A>,
    renderer: R,
    notifications: NotificationCenter,
    labels: &'static Labels,
}

impl<A: ClinicApi, R: CalendarRenderer> CalendarScreen<A, R> {
    pub fn new(engine: CalendarEngine<A>, renderer: R, labels: &'static Labels) -> Self {
        Self {
            engine,
            renderer,
            notifications: NotificationCenter::new(),
            labels,
        }
    }

    pub fn engine(&self) -> &CalendarEngine<A> {
        &self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Load the focused period and draw it.
    pub fn open(&mut self) -> io::Result<()> {
        self.reload();
        self.render()
    }

    fn reload(&mut self) {
        if self.engine.refresh().is_err() {
            self.notifications.error(self.labels.calendar_load_error);
        }
    }

    /// Apply an action. Actions that leave the calendar are returned as a
    /// redirect for the caller to open.
    pub fn handle(&mut self, action: Action) -> io::Result<Option<Redirect>> {
        match action {
            Action::SetView(granularity) => self.engine.set_granularity(granularity),
            Action::Navigate(direction) => {
                if self.engine.navigate(direction).is_err() {
                    self.notifications.error(self.labels.calendar_load_error);
                }
            }
            Action::SelectDate(date) => self.engine.select_date(date),
            Action::Today => {
                let today = self.engine.today();
                self.engine.select_date(today);
                self.reload();
            }
            other => return Ok(other.redirect()),
        }
        self.render()?;
        Ok(None)
    }

    pub fn render(&mut self) -> io::Result<()> {
        let title = self
            .labels
            .calendar_title(self.engine.granularity(), self.engine.focused_date());
        let grid = self.engine.grid();
        self.renderer.render_calendar(&title, &grid)?;
        flush_notifications(&mut self.renderer, &mut self.notifications)
    }
}

pub struct DashboardScreen<A: ClinicApi, R: CalendarRenderer> {
    service: DashboardService<A>,
    renderer: R,
    notifications: NotificationCenter,
    labels: &'static Labels,
}

impl<A: ClinicApi, R: CalendarRenderer> DashboardScreen<A, R> {
    pub fn new(service: DashboardService<A>, renderer: R, labels: &'static Labels) -> Self {
        Self {
            service,
            renderer,
            notifications: NotificationCenter::new(),
            labels,
        }
    }

    pub fn service(&self) -> &DashboardService<A> {
        &self.service
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn load(&mut self, mode: RefreshMode) -> io::Result<()> {
        if mode.shows_loading() {
            self.renderer.show_loading(true)?;
        }
        let failed = self.service.load(mode).is_err();
        if mode.shows_loading() {
            self.renderer.show_loading(false)?;
        }
        if failed {
            self.notifications.error(self.labels.dashboard_load_error);
        }
        self.render()
    }

    pub fn start_auto_refresh(&mut self, now: DateTime<Utc>) {
        self.service.start_auto_refresh(now);
    }

    /// Background refresh when the timer is due. Returns whether it ran.
    pub fn poll_at(&mut self, now: DateTime<Utc>) -> io::Result<bool> {
        match self.service.poll_at(now) {
            None => Ok(false),
            Some(result) => {
                if result.is_err() {
                    self.notifications.error(self.labels.dashboard_load_error);
                }
                self.render()?;
                Ok(true)
            }
        }
    }

    pub fn handle(&mut self, action: Action) -> Option<Redirect> {
        action.redirect()
    }

    /// Draw the last good snapshot, if any.
    pub fn render(&mut self) -> io::Result<()> {
        if let Some(data) = self.service.snapshot() {
            let view = DashboardView::build(data, self.labels);
            self.renderer.render_dashboard(&view)?;
        }
        flush_notifications(&mut self.renderer, &mut self.notifications)
    }
}

pub struct ScheduleScreen<A: ClinicApi, R: CalendarRenderer> {
    editor: ScheduleEditor<A>,
    renderer: R,
    notifications: NotificationCenter,
    labels: &'static Labels,
    counts: Option<AppointmentCounts>,
}

impl<A: ClinicApi, R: CalendarRenderer> ScheduleScreen<A, R> {
    pub fn new(editor: ScheduleEditor<A>, renderer: R, labels: &'static Labels) -> Self {
        Self {
            editor,
            renderer,
            notifications: NotificationCenter::new(),
            labels,
            counts: None,
        }
    }

    pub fn editor(&self) -> &ScheduleEditor<A> {
        &self.editor
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn open(&mut self) -> io::Result<()> {
        self.reload();
        self.counts = self.editor.appointment_counts();
        self.render()
    }

    fn reload(&mut self) {
        if self.editor.load().is_err() {
            self.notifications.error(self.labels.schedule_load_error);
        }
    }

    pub fn toggle_day(&mut self, weekday: Weekday) -> io::Result<()> {
        self.editor.toggle_day(weekday);
        self.render()
    }

    pub fn update_day_time(&mut self, weekday: Weekday, field: TimeField, value: &str) -> io::Result<()> {
        if let Err(err) = self.editor.update_day_time(weekday, field, value) {
            log::warn!("{}", err);
            let message = match err {
                ScheduleError::InvalidTime { value, .. } => self.labels.invalid_time_message(&value),
                ScheduleError::Client(_) => self.labels.schedule_save_error.to_string(),
            };
            self.notifications.warning(message);
        }
        self.render()
    }

    pub fn set_default_hours(&mut self) -> io::Result<()> {
        self.editor.set_default_hours();
        self.notifications.info(self.labels.default_hours_set);
        self.render()
    }

    pub fn save(&mut self) -> io::Result<()> {
        match self.editor.save() {
            Ok(message) => {
                let message = message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| self.labels.schedule_saved.to_string());
                self.notifications.success(message);
                self.reload();
            }
            Err(_) => self.notifications.error(self.labels.schedule_save_error),
        }
        self.render()
    }

    pub fn reset(&mut self) -> io::Result<()> {
        self.reload();
        self.render()
    }

    pub fn render(&mut self) -> io::Result<()> {
        let view = ScheduleView::build(&self.editor, self.counts, self.labels);
        self.renderer.render_schedule(&view)?;
        flush_notifications(&mut self.renderer, &mut self.notifications)
    }
}
