//! Configuration management
//!
//! Every section has defaults so a bare `Config::default()` describes a
//! working deployment once team credentials are supplied.

mod team;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub use team::{CalendlyCredentials, TeamMember, TeamRegistry, ZoomCredentials};

use crate::constants::{
    DEFAULT_LOOKBACK_DAYS, MAX_FETCHED_RECORDS, SESSION_REPORT_MAX_DAYS,
};
use crate::errors::{Result, SlotwatchError};
use crate::types::MatchPolicy;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub reporting: ReportingConfig,
    pub calendly: CalendlyConfig,
    pub zoom: ZoomConfig,
    pub notifier: NotifierConfig,
    pub schedule: ScheduleConfig,
    pub team: TeamRegistry,
}

impl Config {
    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.reporting.tz()?;

        if self.reporting.participant_concurrency == 0 {
            return Err(SlotwatchError::Config(
                "reporting.participant_concurrency must be at least 1".into(),
            ));
        }
        if self.calendly.page_size == 0 || self.zoom.page_size == 0 {
            return Err(SlotwatchError::Config("page sizes must be at least 1".into()));
        }
        if self.zoom.max_window_days < 1 {
            return Err(SlotwatchError::Config("zoom.max_window_days must be at least 1".into()));
        }
        if let Some(key) = self.reporting.default_person.as_deref() {
            if self.team.get(key).is_none() {
                return Err(SlotwatchError::Config(format!(
                    "reporting.default_person '{key}' is not a team member"
                )));
            }
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 3000 }
    }
}

/// Reconciliation and reporting behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// IANA zone used for day boundaries, report dates and cron triggers.
    pub timezone: String,
    /// Member analysed when no person is given. Falls back to the first
    /// registered member.
    pub default_person: Option<String>,
    pub match_policy: MatchPolicy,
    /// Maximum participant lookups in flight per run.
    pub participant_concurrency: usize,
    pub lookback_days: i64,
}

impl ReportingConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|e| {
            SlotwatchError::Config(format!("invalid reporting timezone '{}': {e}", self.timezone))
        })
    }
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            default_person: None,
            match_policy: MatchPolicy::default(),
            participant_concurrency: 4,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

/// Scheduling service (Calendly) endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendlyConfig {
    pub base_url: String,
    pub page_size: u32,
    pub max_records: usize,
    pub timeout_secs: u64,
}

impl Default for CalendlyConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.calendly.com".to_string(),
            page_size: 100,
            max_records: MAX_FETCHED_RECORDS,
            timeout_secs: 30,
        }
    }
}

/// Conferencing service (Zoom) endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub api_base_url: String,
    pub oauth_url: String,
    pub page_size: u32,
    pub participants_page_size: u32,
    /// Longest `from`..`to` span the report endpoint accepts.
    pub max_window_days: i64,
    pub max_records: usize,
    pub timeout_secs: u64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.zoom.us/v2".to_string(),
            oauth_url: "https://zoom.us/oauth/token".to_string(),
            page_size: 300,
            participants_page_size: 30,
            max_window_days: SESSION_REPORT_MAX_DAYS,
            max_records: MAX_FETCHED_RECORDS,
            timeout_secs: 30,
        }
    }
}

/// Webhook notifier settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Notifications are logged and dropped when unset.
    #[serde(skip_serializing)]
    pub webhook_url: Option<String>,
    pub channel: String,
    pub alert_channel: String,
    pub username: String,
    pub icon_emoji: String,
    pub timeout_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            channel: "#general".to_string(),
            alert_channel: "#alerts".to_string(),
            username: "Slotwatch".to_string(),
            icon_emoji: ":robot_face:".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Periodic trigger settings (six-field cron expressions)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub enabled: bool,
    pub run_on_startup: bool,
    pub analysis_cron: String,
    pub summary_crons: Vec<String>,
    pub job_timeout_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            run_on_startup: true,
            analysis_cron: "0 */30 * * * *".to_string(),
            summary_crons: vec!["0 0 12 * * *".to_string(), "0 0 18 * * *".to_string()],
            job_timeout_secs: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reporting.tz().unwrap(), Tz::UTC);
        assert_eq!(config.schedule.summary_crons.len(), 2);
    }

    #[test]
    fn partial_toml_keeps_section_defaults() {
        let config: Config = toml::from_str(
            r##"
            [reporting]
            timezone = "Europe/Istanbul"
            match_policy = "exclusive"

            [notifier]
            channel = "#sales"
            "##,
        )
        .unwrap();

        assert_eq!(config.reporting.match_policy, MatchPolicy::Exclusive);
        assert_eq!(config.reporting.participant_concurrency, 4);
        assert_eq!(config.notifier.channel, "#sales");
        assert_eq!(config.notifier.alert_channel, "#alerts");
        assert_eq!(config.zoom.page_size, 300);
    }

    #[test]
    fn invalid_timezone_fails_validation() {
        let mut config = Config::default();
        config.reporting.timezone = "Mars/Olympus".into();
        assert!(matches!(config.validate(), Err(SlotwatchError::Config(_))));
    }

    #[test]
    fn unknown_default_person_fails_validation() {
        let mut config = Config::default();
        config.reporting.default_person = Some("ghost".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn webhook_url_is_not_serialized() {
        let mut config = Config::default();
        config.notifier.webhook_url = Some("https://hooks.example/secret".into());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hooks.example"));
    }
}
