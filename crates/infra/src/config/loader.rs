//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Read the explicit file, or the first probed file, or fall back to
//!    `Config::default()`
//! 2. Apply environment overrides
//! 3. Add team members and their credentials from the environment
//! 4. Validate
//!
//! ## Environment Variables
//! - `SLOTWATCH_HOST`, `SLOTWATCH_PORT`: HTTP bind address
//! - `SLOTWATCH_TIMEZONE`: reporting timezone (IANA name)
//! - `SLOTWATCH_DEFAULT_PERSON`: team member used when none is given
//! - `SLOTWATCH_MATCH_POLICY`: `reusable` or `exclusive`
//! - `SLOTWATCH_PARTICIPANT_CONCURRENCY`, `SLOTWATCH_LOOKBACK_DAYS`
//! - `SLOTWATCH_SCHEDULER_ENABLED`, `SLOTWATCH_RUN_ON_STARTUP` (true/false)
//! - `SLOTWATCH_ANALYSIS_CRON`, `SLOTWATCH_SUMMARY_CRONS` (`;` separated)
//! - `SLACK_WEBHOOK_URL`, `SLACK_CHANNEL`, `SLACK_ALERT_CHANNEL`
//! - `SLOTWATCH_TEAM`: comma separated member keys
//!
//! Per member, with `<KEY>` the upper-cased member key:
//! `TEAM_MEMBER_NAME_<KEY>`, `CALENDLY_API_KEY_<KEY>`,
//! `CALENDLY_USER_EMAIL_<KEY>`, `ZOOM_CLIENT_ID_<KEY>`,
//! `ZOOM_CLIENT_SECRET_<KEY>`, `ZOOM_ACCOUNT_ID_<KEY>`,
//! `ZOOM_USER_EMAIL_<KEY>`.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{toml,json}` and `./slotwatch.{toml,json}`
//! 2. The same names in the parent directory
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use slotwatch_domain::{
    CalendlyCredentials, Config, MatchPolicy, Result, SlotwatchError, TeamMember, ZoomCredentials,
};
use tracing::{debug, info, warn};

const FILE_NAMES: [&str; 4] = ["config.toml", "config.json", "slotwatch.toml", "slotwatch.json"];

/// Load configuration from an explicit path, a probed file or defaults, then
/// apply the process environment.
///
/// # Errors
/// Returns `SlotwatchError::Config` if an explicit file is missing, a file
/// cannot be parsed, an override has an invalid value, or validation fails.
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    load_with_env(path, |key| std::env::var(key).ok())
}

/// [`load`] with a custom environment lookup.
pub fn load_with_env<F>(path: Option<PathBuf>, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => load_from_file(&path)?,
        None => match probe_config_paths() {
            Some(path) => load_from_file(&path)?,
            None => {
                info!("No configuration file found, using defaults");
                Config::default()
            }
        },
    };

    apply_env_overrides(&mut config, &env)?;
    apply_team_env(&mut config, &env)?;
    config.validate()?;

    info!(
        members = config.team.len(),
        timezone = %config.reporting.timezone,
        "Configuration loaded"
    );
    Ok(config)
}

/// Load configuration from a file. Format is detected by extension.
///
/// # Errors
/// Returns `SlotwatchError::Config` if the file is missing or invalid.
pub fn load_from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(SlotwatchError::Config(format!("Config file not found: {}", path.display())));
    }

    info!(path = %path.display(), "Loading configuration from file");
    let contents = std::fs::read_to_string(path)
        .map_err(|e| SlotwatchError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SlotwatchError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SlotwatchError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SlotwatchError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file among the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.join(".."));
        dirs.insert(0, cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn apply_env_overrides<F>(config: &mut Config, env: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = env_string(env, "SLOTWATCH_HOST") {
        config.server.host = host;
    }
    if let Some(port) = env_parse(env, "SLOTWATCH_PORT")? {
        config.server.port = port;
    }

    if let Some(tz) = env_string(env, "SLOTWATCH_TIMEZONE") {
        config.reporting.timezone = tz;
    }
    if let Some(person) = env_string(env, "SLOTWATCH_DEFAULT_PERSON") {
        config.reporting.default_person = Some(person);
    }
    if let Some(policy) = env_parse::<MatchPolicy, _>(env, "SLOTWATCH_MATCH_POLICY")? {
        config.reporting.match_policy = policy;
    }
    if let Some(limit) = env_parse(env, "SLOTWATCH_PARTICIPANT_CONCURRENCY")? {
        config.reporting.participant_concurrency = limit;
    }
    if let Some(days) = env_parse(env, "SLOTWATCH_LOOKBACK_DAYS")? {
        config.reporting.lookback_days = days;
    }

    if let Some(enabled) = env_bool(env, "SLOTWATCH_SCHEDULER_ENABLED") {
        config.schedule.enabled = enabled;
    }
    if let Some(on_startup) = env_bool(env, "SLOTWATCH_RUN_ON_STARTUP") {
        config.schedule.run_on_startup = on_startup;
    }
    if let Some(cron) = env_string(env, "SLOTWATCH_ANALYSIS_CRON") {
        config.schedule.analysis_cron = cron;
    }
    if let Some(crons) = env_string(env, "SLOTWATCH_SUMMARY_CRONS") {
        config.schedule.summary_crons =
            crons.split(';').map(str::trim).filter(|c| !c.is_empty()).map(String::from).collect();
    }

    if let Some(url) = env_string(env, "SLACK_WEBHOOK_URL") {
        config.notifier.webhook_url = Some(url);
    }
    if let Some(channel) = env_string(env, "SLACK_CHANNEL") {
        config.notifier.channel = channel;
    }
    if let Some(channel) = env_string(env, "SLACK_ALERT_CHANNEL") {
        config.notifier.alert_channel = channel;
    }

    Ok(())
}

/// Register members listed in `SLOTWATCH_TEAM` and attach per-member
/// credentials to every registered member.
fn apply_team_env<F>(config: &mut Config, env: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(keys) = env_string(env, "SLOTWATCH_TEAM") {
        for key in keys.split(',').map(str::trim).filter(|k| !k.is_empty()) {
            if config.team.get(key).is_none() {
                config.team.insert(TeamMember::new(key, key))?;
            }
        }
    }

    let keys: Vec<String> = config.team.members().iter().map(|m| m.key.clone()).collect();
    for key in keys {
        let suffix = env_suffix(&key);
        let Some(member) = config.team.get_mut(&key) else {
            continue;
        };

        if let Some(name) = env_string(env, &format!("TEAM_MEMBER_NAME_{suffix}")) {
            member.name = name;
        }

        let calendly_email = env_string(env, &format!("CALENDLY_USER_EMAIL_{suffix}"));
        if let Some(api_key) = env_string(env, &format!("CALENDLY_API_KEY_{suffix}")) {
            member.calendly = Some(CalendlyCredentials { api_key, user_email: calendly_email.clone() });
        }

        let zoom_email = env_string(env, &format!("ZOOM_USER_EMAIL_{suffix}"));
        let client_id = env_string(env, &format!("ZOOM_CLIENT_ID_{suffix}"));
        let client_secret = env_string(env, &format!("ZOOM_CLIENT_SECRET_{suffix}"));
        let account_id = env_string(env, &format!("ZOOM_ACCOUNT_ID_{suffix}"));
        match (client_id, client_secret, account_id) {
            (Some(client_id), Some(client_secret), Some(account_id)) => {
                member.zoom = Some(ZoomCredentials {
                    client_id,
                    client_secret,
                    account_id,
                    user_email: zoom_email.clone(),
                });
            }
            (None, None, None) => {}
            _ => warn!(person = %key, "Incomplete Zoom credentials in environment; ignoring"),
        }

        if member.email.is_none() {
            member.email = zoom_email.or(calendly_email);
        }

        debug!(
            person = %key,
            calendly = member.calendly.is_some(),
            zoom = member.zoom.is_some(),
            "Resolved team member credentials"
        );
    }

    Ok(())
}

/// Environment suffix for a member key: upper case, non-alphanumerics as `_`.
fn env_suffix(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}

fn env_string<F>(env: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T, F>(env: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    env_string(env, key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| SlotwatchError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool<F>(env: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    env_string(env, key)
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}
