//! Scheduled meetings, conferencing sessions and their reconciled outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// A meeting booked in the scheduling service.
///
/// Identity is `id`, assigned upstream. The same booking fetched twice
/// carries the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledMeeting {
    pub id: String,
    pub name: String,
    pub scheduled_at: DateTime<Utc>,
    pub person_key: String,
}

/// A conferencing session reported after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: String,
    pub topic: String,
    pub started_at: DateTime<Utc>,
    pub participant_count: u32,
    /// Instance identifier used by the participants report endpoint.
    pub uuid: String,
}

/// Outcome of reconciling one scheduled meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MeetingStatus {
    /// Pending: not matched and not yet overdue.
    #[default]
    Scheduled,
    OnTime,
    Late,
    NoParticipation,
    NotStarted,
}

impl_domain_status_conversions!(MeetingStatus {
    Scheduled => "scheduled",
    OnTime => "on-time",
    Late => "late",
    NoParticipation => "no-participation",
    NotStarted => "not-started",
});

/// How a matched session is treated for subsequent meetings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// A session stays in the candidate pool after matching and may satisfy
    /// several scheduled meetings.
    #[default]
    Reusable,
    /// A session is removed from the candidate pool once matched.
    Exclusive,
}

impl_domain_status_conversions!(MatchPolicy {
    Reusable => "reusable",
    Exclusive => "exclusive",
});

/// A scheduled meeting annotated with its reconciliation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedMeeting {
    #[serde(flatten)]
    pub meeting: ScheduledMeeting,
    pub status: MeetingStatus,
    /// Signed whole minutes between scheduled and actual start.
    pub delay_minutes: Option<i64>,
    pub actual_start_time: Option<DateTime<Utc>>,
    pub participants_count: Option<u32>,
    pub matched_session_id: Option<String>,
    /// Resolved display names, filled for late and unattended meetings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<String>,
}

impl ClassifiedMeeting {
    pub fn pending(meeting: ScheduledMeeting) -> Self {
        Self {
            meeting,
            status: MeetingStatus::Scheduled,
            delay_minutes: None,
            actual_start_time: None,
            participants_count: None,
            matched_session_id: None,
            participants: Vec::new(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == MeetingStatus::Scheduled
    }
}
