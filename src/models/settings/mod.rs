// Settings module
// Console configuration persisted as TOML

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::view::Granularity;
use crate::utils::date::ClinicZone;

pub const API_URL_ENV: &str = "VET_CALENDAR_API_URL";
pub const TIMEZONE_ENV: &str = "VET_CALENDAR_TIMEZONE";
/// Longest accepted dashboard refresh interval: one day.
pub const MAX_REFRESH_MINUTES: u64 = 24 * 60;

/// Language used for labels and fallback texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

/// When the calendar asks the backend for a period again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefetchPolicy {
    /// Every navigation step refetches, even inside the cached month.
    #[default]
    Always,
    /// Only refetch when the focused month changes.
    OnMonthChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub max_retries: usize,
    pub retry_delay_ms: u64,
    pub dashboard_refresh_minutes: u64,
    pub locale: Locale,
    /// IANA time zone name; the machine's local zone when unset.
    pub timezone: Option<String>,
    pub default_view: Granularity,
    pub refetch_policy: RefetchPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 20,
            max_retries: 2,
            retry_delay_ms: 400,
            dashboard_refresh_minutes: 5,
            locale: Locale::Es,
            timezone: None,
            default_view: Granularity::Month,
            refetch_policy: RefetchPolicy::Always,
        }
    }
}

impl Settings {
    /// Default location of the settings file.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "VetClinic", "VetCalendar")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Load settings from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings: Settings = toml::from_str(&data)
            .with_context(|| format!("failed to parse settings from {}", path.display()))?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(path, data)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        Ok(())
    }

    /// Environment variables take precedence over the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
        if let Ok(zone) = std::env::var(TIMEZONE_ENV) {
            if !zone.trim().is_empty() {
                self.timezone = Some(zone.trim().to_string());
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err("API base URL cannot be empty".to_string());
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err("API base URL must start with http:// or https://".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than 0 seconds".to_string());
        }
        if self.dashboard_refresh_minutes == 0 {
            return Err("Dashboard refresh interval must be greater than 0 minutes".to_string());
        }
        if self.dashboard_refresh_minutes > MAX_REFRESH_MINUTES {
            return Err(format!(
                "Dashboard refresh interval cannot exceed {} minutes",
                MAX_REFRESH_MINUTES
            ));
        }
        if let Some(zone) = &self.timezone {
            if ClinicZone::parse(zone).is_none() {
                return Err(format!("Unknown time zone '{}'", zone));
            }
        }
        Ok(())
    }

    /// Zone calendar days are counted in. Invalid names fall back to local time.
    pub fn clinic_zone(&self) -> ClinicZone {
        match &self.timezone {
            Some(name) => ClinicZone::parse(name).unwrap_or_else(|| {
                log::warn!("Unknown time zone '{}', using local time", name);
                ClinicZone::Local
            }),
            None => ClinicZone::Local,
        }
    }
}
