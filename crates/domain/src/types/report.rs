//! Analysis reports, alert events and the published statistics snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::meeting::ClassifiedMeeting;
use crate::errors::SourceError;
use crate::impl_domain_status_conversions;

/* -------------------------------------------------------------------------- */
/* Per-outcome details */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LateDetail {
    pub name: String,
    pub scheduled_at: DateTime<Utc>,
    pub delay_minutes: i64,
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoParticipationDetail {
    pub name: String,
    pub scheduled_at: DateTime<Utc>,
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotStartedDetail {
    pub name: String,
    pub scheduled_at: DateTime<Utc>,
}

/* -------------------------------------------------------------------------- */
/* Alerts */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    Late,
    NoParticipation,
    NotStarted,
    LowPerformance,
}

impl_domain_status_conversions!(AlertKind {
    Late => "late",
    NoParticipation => "no-participation",
    NotStarted => "not-started",
    LowPerformance => "low-performance",
});

/// A policy violation worth telling someone about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    /// Absent for run-level alerts such as low performance.
    pub meeting_name: Option<String>,
    pub person_name: String,
    pub kind: AlertKind,
    pub delay_minutes: Option<i64>,
    pub message: String,
}

impl AlertEvent {
    pub fn late(meeting_name: &str, person_name: &str, delay_minutes: i64) -> Self {
        Self {
            meeting_name: Some(meeting_name.to_owned()),
            person_name: person_name.to_owned(),
            kind: AlertKind::Late,
            delay_minutes: Some(delay_minutes),
            message: format!("{meeting_name} started {delay_minutes} minutes late"),
        }
    }

    pub fn no_participation(meeting_name: &str, person_name: &str) -> Self {
        Self {
            meeting_name: Some(meeting_name.to_owned()),
            person_name: person_name.to_owned(),
            kind: AlertKind::NoParticipation,
            delay_minutes: None,
            message: format!("Nobody joined {meeting_name}"),
        }
    }

    pub fn not_started(meeting_name: &str, person_name: &str) -> Self {
        Self {
            meeting_name: Some(meeting_name.to_owned()),
            person_name: person_name.to_owned(),
            kind: AlertKind::NotStarted,
            delay_minutes: None,
            message: format!("{meeting_name} was never started"),
        }
    }

    pub fn low_performance(person_name: &str, score: u8) -> Self {
        Self {
            meeting_name: None,
            person_name: person_name.to_owned(),
            kind: AlertKind::LowPerformance,
            delay_minutes: None,
            message: format!("Performance score is critical: {score}%"),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Report */
/* -------------------------------------------------------------------------- */

/// Result of one analysis run over one person and window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub timestamp: DateTime<Utc>,
    pub person_key: String,
    pub person_name: String,
    /// All meetings in scope, pending ones included.
    pub total: usize,
    pub on_time: usize,
    pub late: usize,
    pub no_participation: usize,
    pub not_started: usize,
    /// Always within `0..=100`.
    pub performance_score: u8,
    pub details: Vec<ClassifiedMeeting>,
    pub late_details: Vec<LateDetail>,
    pub no_participation_details: Vec<NoParticipationDetail>,
    pub not_started_details: Vec<NotStartedDetail>,
    pub critical_alerts: Vec<AlertEvent>,
    pub performance_alert: Option<AlertEvent>,
    /// Upstream failures that degraded this run's inputs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_errors: Vec<SourceError>,
}

impl AnalysisReport {
    /// Meetings not yet due. Zero when the counts are inconsistent.
    pub fn pending(&self) -> usize {
        self.total
            .saturating_sub(self.on_time)
            .saturating_sub(self.late)
            .saturating_sub(self.no_participation)
            .saturating_sub(self.not_started)
    }

    pub fn is_degraded(&self) -> bool {
        !self.source_errors.is_empty()
    }
}

/* -------------------------------------------------------------------------- */
/* Snapshot */
/* -------------------------------------------------------------------------- */

/// Point-in-time statistics published after each full analysis run.
///
/// This is the only state the reporting surface reads. Each publication
/// replaces the previous snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Calendar date of the run in the reporting timezone.
    pub date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub person_key: String,
    pub person_name: String,
    pub total: usize,
    pub on_time: usize,
    pub late: usize,
    pub no_participation: usize,
    pub not_started: usize,
    pub performance_score: u8,
    pub late_details: Vec<LateDetail>,
    pub no_participation_details: Vec<NoParticipationDetail>,
}

impl StatsSnapshot {
    pub fn from_report(report: &AnalysisReport, date: NaiveDate) -> Self {
        Self {
            date,
            generated_at: report.timestamp,
            person_key: report.person_key.clone(),
            person_name: report.person_name.clone(),
            total: report.total,
            on_time: report.on_time,
            late: report.late,
            no_participation: report.no_participation,
            not_started: report.not_started,
            performance_score: report.performance_score,
            late_details: report.late_details.clone(),
            no_participation_details: report.no_participation_details.clone(),
        }
    }
}
