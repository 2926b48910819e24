// Veterinary calendar console
// Main entry point

use std::path::PathBuf;
use std::rc::Rc;
use std::thread;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc, Weekday};
use clap::{Parser, Subcommand};

use vet_calendar::models::schedule::TimeField;
use vet_calendar::models::settings::Settings;
use vet_calendar::models::view::Granularity;
use vet_calendar::services::api::HttpClinicApi;
use vet_calendar::services::calendar::CalendarEngine;
use vet_calendar::services::dashboard::{DashboardService, RefreshMode};
use vet_calendar::services::schedule::ScheduleEditor;
use vet_calendar::ui::{
    ActionRouter, CalendarScreen, DashboardScreen, Labels, Redirect, ScheduleScreen, TextRenderer,
};

#[derive(Parser)]
#[command(name = "vet-calendar")]
#[command(about = "Appointment calendar, dashboard and working hours for the clinic staff")]
struct Cli {
    /// Settings file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the appointment calendar
    Calendar {
        /// month, week or day
        #[arg(short, long)]
        view: Option<Granularity>,

        /// Focus this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Navigation steps applied in order ("prev" or "next")
        #[arg(short, long)]
        navigate: Vec<String>,
    },
    /// Show the dashboard
    Dashboard {
        /// Keep running and refresh in the background
        #[arg(long)]
        watch: bool,
    },
    /// Show or edit the weekly working hours
    Schedule {
        /// Apply the default Monday to Friday hours
        #[arg(long)]
        defaults: bool,

        /// Toggle a day on or off (e.g. "mon")
        #[arg(long)]
        toggle: Vec<Weekday>,

        /// Set a time, as DAY:FIELD=HH:MM (e.g. "tue:end_time=18:00")
        #[arg(long)]
        set: Vec<String>,

        /// Save the result to the backend
        #[arg(long)]
        save: bool,
    },
    /// Open a page for a named action (e.g. "view_appointment 42")
    Open {
        action: String,
        args: Vec<String>,

        /// Print the URL instead of opening a browser
        #[arg(long)]
        print: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = load_settings(cli.config)?;
    let labels = Labels::for_locale(settings.locale);
    log::info!("Using backend {}", settings.api_base_url);

    match cli.command {
        Commands::Calendar { view, date, navigate } => {
            let api = Rc::new(HttpClinicApi::new(&settings)?);
            let mut engine = match date {
                Some(date) => CalendarEngine::with_focus(api, &settings, date),
                None => CalendarEngine::new(api, &settings),
            };
            if let Some(view) = view {
                engine.set_granularity(view);
            }

            let mut screen = CalendarScreen::new(engine, TextRenderer::stdout(labels), labels);
            screen.open()?;

            let router = ActionRouter::with_defaults();
            for step in &navigate {
                let action = router
                    .dispatch("navigate", &[step.as_str()])
                    .map_err(|e| anyhow::anyhow!(e))?;
                screen.handle(action)?;
            }
            Ok(())
        }
        Commands::Dashboard { watch } => {
            let api = HttpClinicApi::new(&settings)?;
            let service = DashboardService::new(api, settings.dashboard_refresh_minutes);
            let mut screen = DashboardScreen::new(service, TextRenderer::stdout(labels), labels);
            screen.load(RefreshMode::Foreground)?;

            if watch {
                screen.start_auto_refresh(Utc::now());
                loop {
                    thread::sleep(screen.service().timer().time_until_due(Utc::now()));
                    screen.poll_at(Utc::now())?;
                }
            }
            Ok(())
        }
        Commands::Schedule {
            defaults,
            toggle,
            set,
            save,
        } => {
            let api = HttpClinicApi::new(&settings)?;
            let mut screen = ScheduleScreen::new(ScheduleEditor::new(api), TextRenderer::stdout(labels), labels);
            screen.open()?;

            if defaults {
                screen.set_default_hours()?;
            }
            for weekday in toggle {
                screen.toggle_day(weekday)?;
            }
            for assignment in &set {
                let (weekday, field, value) = parse_assignment(assignment)?;
                screen.update_day_time(weekday, field, value)?;
            }
            if save {
                screen.save()?;
            }
            Ok(())
        }
        Commands::Open { action, args, print } => {
            let router = ActionRouter::with_defaults();
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            let action = router
                .dispatch(&action, &args)
                .map_err(|e| anyhow::anyhow!(e))?;
            let redirect = action
                .redirect()
                .with_context(|| format!("'{:?}' does not open a page", action))?;
            open_redirect(&settings, &redirect, print)
        }
    }
}

fn load_settings(path: Option<PathBuf>) -> Result<Settings> {
    let mut settings = match path.or_else(Settings::default_path) {
        Some(path) => Settings::load(&path)?,
        None => {
            log::warn!("No config directory available; using default settings");
            Settings::default()
        }
    };
    settings.apply_env_overrides();
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid settings: {}", e))?;
    Ok(settings)
}

fn parse_assignment(assignment: &str) -> Result<(Weekday, TimeField, &str)> {
    let (target, value) = assignment
        .split_once('=')
        .with_context(|| format!("Expected DAY:FIELD=HH:MM, got '{}'", assignment))?;
    let (day, field) = target
        .split_once(':')
        .with_context(|| format!("Expected DAY:FIELD=HH:MM, got '{}'", assignment))?;
    let weekday = day
        .trim()
        .parse::<Weekday>()
        .map_err(|_| anyhow::anyhow!("Unknown day '{}'", day))?;
    let field = TimeField::parse(field.trim()).with_context(|| format!("Unknown field '{}'", field))?;
    Ok((weekday, field, value.trim()))
}

fn open_redirect(settings: &Settings, redirect: &Redirect, print: bool) -> Result<()> {
    let url = redirect.url(&settings.api_base_url);
    if print {
        println!("{}", url);
        return Ok(());
    }
    log::info!("Opening {}", url);
    webbrowser::open(&url).with_context(|| format!("Failed to open {}", url))?;
    Ok(())
}
