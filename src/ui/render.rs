//! Render targets. The console ships a plain-text renderer; anything that
//! implements [`CalendarRenderer`] can replace it.

use std::io::{self, Write};

use chrono::Datelike;

use super::labels::Labels;
use super::notifications::Notification;
use super::views::{DashboardView, Listing, ScheduleView};
use crate::models::appointment::Appointment;
use crate::services::calendar::grid::{DayGrid, MonthGrid, MonthPlacement, WeekGrid};
use crate::services::calendar::GridDescription;
use crate::utils::date::hour_slot;

pub trait CalendarRenderer {
    fn show_loading(&mut self, visible: bool) -> io::Result<()>;

    fn render_calendar(&mut self, title: &str, grid: &GridDescription) -> io::Result<()>;

    fn render_dashboard(&mut self, view: &DashboardView) -> io::Result<()>;

    fn render_schedule(&mut self, view: &ScheduleView) -> io::Result<()>;

    fn render_notifications(&mut self, notifications: &[Notification]) -> io::Result<()>;
}

/// Writes every screen as plain text.
pub struct TextRenderer<W: Write> {
    out: W,
    labels: &'static Labels,
}

impl TextRenderer<io::Stdout> {
    pub fn stdout(labels: &'static Labels) -> Self {
        Self::new(io::stdout(), labels)
    }
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, labels: &'static Labels) -> Self {
        Self { out, labels }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn month(&mut self, grid: &MonthGrid) -> io::Result<()> {
        let header: Vec<String> = self.labels.day_names.iter().map(|name| format!("{:^6}", name)).collect();
        writeln!(self.out, "{}", header.join(""))?;

        for week in grid.weeks() {
            let mut line = String::new();
            for cell in week {
                let day = cell.date.day();
                let text = match (cell.is_today, cell.is_selected) {
                    (true, _) => format!("[{:>2}]", day),
                    (false, true) => format!("({:>2})", day),
                    _ if cell.placement == MonthPlacement::OtherMonth => format!(" ·{:>2}", day),
                    _ => format!("  {:>2}", day),
                };
                let marker = if cell.shown.is_empty() { ' ' } else { '•' };
                line.push_str(&format!("{}{} ", text, marker));
            }
            writeln!(self.out, "{}", line.trim_end())?;
        }

        for cell in grid.cells.iter().filter(|cell| !cell.shown.is_empty()) {
            let entries: Vec<String> = cell
                .shown
                .iter()
                .map(|summary| {
                    format!(
                        "{} {}",
                        summary.time,
                        summary.pet_name.as_deref().unwrap_or(self.labels.unnamed_pet)
                    )
                })
                .collect();
            let mut line = format!("{:>2}: {}", cell.date.day(), entries.join(", "));
            if cell.overflow > 0 {
                line.push_str(&format!(" {}", self.labels.overflow(cell.overflow)));
            }
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn week(&mut self, grid: &WeekGrid) -> io::Result<()> {
        let mut header = format!("{:<6}", self.labels.hour_header);
        for day in &grid.days {
            let name = self.labels.short_day_name(day.date.weekday());
            let mark = if day.is_today { "*" } else { "" };
            header.push_str(&format!("| {:<10}", format!("{} {}{}", name, day.date.day(), mark)));
        }
        writeln!(self.out, "{}", header)?;

        for row in &grid.rows {
            let mut line = format!("{:<6}", hour_slot(row.hour));
            for cell in &row.cells {
                let text = match cell.appointments.as_slice() {
                    [] => String::new(),
                    [only] => pet(only, self.labels).to_string(),
                    [first, rest @ ..] => format!("{} +{}", pet(first, self.labels), rest.len()),
                };
                line.push_str(&format!("| {:<10}", truncate(&text, 10)));
            }
            writeln!(self.out, "{}", line.trim_end())?;
        }
        Ok(())
    }

    fn day(&mut self, grid: &DayGrid) -> io::Result<()> {
        for slot in &grid.slots {
            if slot.accepts_new {
                writeln!(self.out, "{}  + {}", hour_slot(slot.hour), self.labels.new_appointment)?;
                continue;
            }
            for appointment in &slot.appointments {
                writeln!(
                    self.out,
                    "{}  {} {} ({}: {}) · {} [{}]",
                    hour_slot(slot.hour),
                    appointment.appointment_time,
                    pet(appointment, self.labels),
                    self.labels.owner_prefix,
                    appointment.owner_name_or(self.labels.unspecified),
                    appointment.reason_or(self.labels.general_consultation),
                    self.labels.status_text(&appointment.status)
                )?;
            }
        }
        Ok(())
    }
}

fn pet<'a>(appointment: &'a Appointment, labels: &'a Labels) -> &'a str {
    appointment.pet_name_or(labels.unnamed_pet)
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

impl<W: Write> CalendarRenderer for TextRenderer<W> {
    fn show_loading(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            writeln!(self.out, "{}", self.labels.loading)?;
        }
        Ok(())
    }

    fn render_calendar(&mut self, title: &str, grid: &GridDescription) -> io::Result<()> {
        writeln!(self.out, "== {} ==", title)?;
        match grid {
            GridDescription::Month(month) => self.month(month)?,
            GridDescription::Week(week) => self.week(week)?,
            GridDescription::Day(day) => self.day(day)?,
        }
        self.out.flush()
    }

    fn render_dashboard(&mut self, view: &DashboardView) -> io::Result<()> {
        if let Some(title) = &view.welcome_title {
            writeln!(self.out, "{}", title)?;
        }
        for stat in &view.stats {
            writeln!(self.out, "{:<24}{:>6}", stat.label, stat.value)?;
        }
        writeln!(self.out)?;

        match &view.appointments {
            Listing::Items(rows) => {
                for row in rows {
                    writeln!(
                        self.out,
                        "{}  {} · {} · {} [{}]",
                        row.time, row.pet_name, row.owner_line, row.reason, row.status_text
                    )?;
                }
            }
            Listing::Empty(empty) => writeln!(self.out, "{} ({})", empty.message, empty.link_text)?,
        }
        writeln!(self.out)?;

        match &view.patients {
            Listing::Items(cards) => {
                for card in cards {
                    writeln!(
                        self.out,
                        "{} {} · {} · {} · {}",
                        card.initial, card.name, card.species_line, card.age, card.last_visit
                    )?;
                }
            }
            Listing::Empty(empty) => writeln!(self.out, "{} ({})", empty.message, empty.link_text)?,
        }
        self.out.flush()
    }

    fn render_schedule(&mut self, view: &ScheduleView) -> io::Result<()> {
        if let Some(message) = &view.empty_message {
            writeln!(self.out, "{}", message)?;
            return self.out.flush();
        }

        for day in &view.days {
            if day.active {
                writeln!(
                    self.out,
                    "{:<10} {} ({} - {}) {}",
                    day.name, day.hours_line, day.break_start, day.break_end, day.total_line
                )?;
            } else {
                writeln!(self.out, "{:<10} {}", day.name, self.labels.inactive_day)?;
            }
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}: {}", self.labels.working_days, view.working_days)?;
        writeln!(self.out, "{}: {}", self.labels.weekly_hours, view.weekly_hours)?;
        writeln!(self.out, "{}: {}", self.labels.daily_average, view.daily_average)?;
        if let Some(counts) = view.counts {
            writeln!(self.out, "{}: {}", self.labels.stat_today, counts.today)?;
            writeln!(self.out, "{}: {}", self.labels.week_appointments, counts.week)?;
        }
        self.out.flush()
    }

    fn render_notifications(&mut self, notifications: &[Notification]) -> io::Result<()> {
        for notification in notifications {
            writeln!(self.out, "{} {}", notification.level.icon(), notification.message)?;
        }
        self.out.flush()
    }
}
