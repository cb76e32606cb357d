//! Alert derivation.
//!
//! Meeting alerts are raised inline by the reconciliation engine for
//! verdicts flagged critical. One run-level alert is added when the
//! performance score drops below the threshold. No deduplication: repeated
//! runs over the same meetings raise the same alerts again.

use slotwatch_domain::constants::PERFORMANCE_ALERT_THRESHOLD;
use slotwatch_domain::{AlertEvent, ClassifiedMeeting, MeetingStatus};

/// Alert for a critical meeting outcome, if the status has one.
pub fn meeting_alert(meeting: &ClassifiedMeeting, person_name: &str) -> Option<AlertEvent> {
    let name = meeting.meeting.name.as_str();
    match meeting.status {
        MeetingStatus::NoParticipation => Some(AlertEvent::no_participation(name, person_name)),
        MeetingStatus::Late => {
            Some(AlertEvent::late(name, person_name, meeting.delay_minutes.unwrap_or_default()))
        }
        MeetingStatus::NotStarted => Some(AlertEvent::not_started(name, person_name)),
        MeetingStatus::OnTime | MeetingStatus::Scheduled => None,
    }
}

pub fn performance_alert(person_name: &str, score: u8) -> Option<AlertEvent> {
    (score < PERFORMANCE_ALERT_THRESHOLD).then(|| AlertEvent::low_performance(person_name, score))
}
