//! Outcome classification for a single scheduled meeting.
//!
//! Pure function of (scheduled start, matched session, now). Rules, in
//! priority order once a session matched:
//!
//! 1. at most one participant: `no-participation`, always alerted
//! 2. delay of five minutes or less (early starts included): `on-time`
//! 3. otherwise `late`, alerted when the delay exceeds fifteen minutes
//!
//! Without a match the meeting is `not-started` once more than ten minutes
//! have passed since its start, and stays pending before that.

use chrono::{DateTime, Duration, Utc};
use slotwatch_domain::constants::{
    LATE_ALERT_THRESHOLD_MINUTES, MIN_ATTENDED_PARTICIPANTS, NOT_STARTED_GRACE_MINUTES,
    ON_TIME_THRESHOLD_MINUTES,
};
use slotwatch_domain::{MeetingStatus, SessionRecord};

use super::matcher::delay_minutes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub status: MeetingStatus,
    pub delay_minutes: Option<i64>,
    pub critical: bool,
}

pub fn classify(
    scheduled_at: DateTime<Utc>,
    session: Option<&SessionRecord>,
    now: DateTime<Utc>,
) -> Verdict {
    let Some(session) = session else {
        return if now > scheduled_at + Duration::minutes(NOT_STARTED_GRACE_MINUTES) {
            Verdict { status: MeetingStatus::NotStarted, delay_minutes: None, critical: true }
        } else {
            Verdict { status: MeetingStatus::Scheduled, delay_minutes: None, critical: false }
        };
    };

    let delay = delay_minutes(scheduled_at, session.started_at);

    if session.participant_count <= MIN_ATTENDED_PARTICIPANTS {
        Verdict { status: MeetingStatus::NoParticipation, delay_minutes: Some(delay), critical: true }
    } else if delay <= ON_TIME_THRESHOLD_MINUTES {
        Verdict { status: MeetingStatus::OnTime, delay_minutes: Some(delay), critical: false }
    } else {
        Verdict {
            status: MeetingStatus::Late,
            delay_minutes: Some(delay),
            critical: delay > LATE_ALERT_THRESHOLD_MINUTES,
        }
    }
}
