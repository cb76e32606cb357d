//! Shared test helpers for `slotwatch-core` integration tests.
//!
//! Lightweight in-memory mocks for every port so the pipeline tests can focus
//! on behaviour instead of plumbing.

#![allow(dead_code)]

pub mod sources;
pub mod stores;

use chrono::{DateTime, Duration, TimeZone, Utc};
use slotwatch_domain::{ScheduledMeeting, SessionRecord, TeamMember, TeamRegistry};

/// 2026-03-02 at the given UTC wall time.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
}

pub fn meeting(id: &str, scheduled_at: DateTime<Utc>) -> ScheduledMeeting {
    ScheduledMeeting {
        id: id.to_string(),
        name: format!("Meeting {id}"),
        scheduled_at,
        person_key: "ada".to_string(),
    }
}

pub fn session(id: &str, scheduled_at: DateTime<Utc>, offset_minutes: i64, participants: u32) -> SessionRecord {
    SessionRecord {
        session_id: id.to_string(),
        topic: format!("Session {id}"),
        started_at: scheduled_at + Duration::minutes(offset_minutes),
        participant_count: participants,
        uuid: format!("uuid/{id}"),
    }
}

pub fn team() -> TeamRegistry {
    let mut ada = TeamMember::new("ada", "Ada Lovelace");
    ada.email = Some("ada@example.com".to_string());
    let mut grace = TeamMember::new("grace", "Grace Hopper");
    grace.email = Some("grace@example.com".to_string());
    TeamRegistry::new(vec![ada, grace]).unwrap()
}
