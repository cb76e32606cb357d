//! Reconciliation engine
//!
//! Matches, classifies and enriches one run's meetings. Participant names
//! for late and unattended meetings are fetched concurrently with a bounded
//! limit and written back in meeting order.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use slotwatch_domain::{
    AlertEvent, ClassifiedMeeting, MatchPolicy, MeetingStatus, ScheduledMeeting, SessionRecord,
    SourceError,
};
use tracing::{debug, warn};

use super::classifier::classify;
use super::matcher::SessionMatcher;
use crate::analysis::alerts;
use crate::analysis::ports::SessionSource;

/// Output of [`ReconciliationEngine::reconcile`].
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// One entry per input meeting, same order.
    pub meetings: Vec<ClassifiedMeeting>,
    /// Per-meeting critical alerts in meeting order.
    pub alerts: Vec<AlertEvent>,
    /// Failures from participant lookups. Affected meetings carry the
    /// count label instead of names.
    pub participant_errors: Vec<SourceError>,
}

#[derive(Debug, Clone, Copy)]
pub struct ReconciliationEngine {
    policy: MatchPolicy,
    participant_concurrency: usize,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new(MatchPolicy::default(), 4)
    }
}

impl ReconciliationEngine {
    pub fn new(policy: MatchPolicy, participant_concurrency: usize) -> Self {
        Self { policy, participant_concurrency: participant_concurrency.max(1) }
    }

    pub async fn reconcile(
        &self,
        meetings: Vec<ScheduledMeeting>,
        sessions: &[SessionRecord],
        participants: &dyn SessionSource,
        person_name: &str,
        now: DateTime<Utc>,
    ) -> Reconciliation {
        let mut matcher = SessionMatcher::new(sessions, self.policy);
        let mut classified = Vec::with_capacity(meetings.len());
        let mut raised = Vec::new();
        let mut lookups = Vec::new();

        for meeting in meetings {
            let session = matcher.find_match(meeting.scheduled_at);
            let verdict = classify(meeting.scheduled_at, session, now);

            let mut entry = ClassifiedMeeting::pending(meeting);
            entry.status = verdict.status;
            entry.delay_minutes = verdict.delay_minutes;

            if let Some(session) = session {
                entry.actual_start_time = Some(session.started_at);
                entry.participants_count = Some(session.participant_count);
                entry.matched_session_id = Some(session.session_id.clone());

                if needs_participants(entry.status) {
                    lookups.push((classified.len(), session.uuid.clone()));
                }
            }

            if verdict.critical {
                raised.extend(alerts::meeting_alert(&entry, person_name));
            }

            debug!(
                meeting_id = %entry.meeting.id,
                status = %entry.status,
                delay = ?entry.delay_minutes,
                "Classified meeting"
            );
            classified.push(entry);
        }

        let resolved: Vec<_> = stream::iter(lookups)
            .map(|(index, uuid)| async move { (index, participants.get_participants(&uuid).await) })
            .buffered(self.participant_concurrency)
            .collect()
            .await;

        let mut participant_errors = Vec::new();
        for (index, outcome) in resolved {
            if let Some(err) = outcome.error() {
                warn!(error = %err, "Participant lookup degraded");
                participant_errors.push(err.clone());
            }
            let names = outcome.into_records();

            if let Some(entry) = classified.get_mut(index) {
                entry.participants = if names.is_empty() {
                    vec![count_label(entry.status, entry.participants_count.unwrap_or(0))]
                } else {
                    names
                };
            }
        }

        Reconciliation { meetings: classified, alerts: raised, participant_errors }
    }
}

fn needs_participants(status: MeetingStatus) -> bool {
    matches!(status, MeetingStatus::Late | MeetingStatus::NoParticipation)
}

/// Placeholder shown when no participant names could be resolved.
fn count_label(status: MeetingStatus, count: u32) -> String {
    match status {
        MeetingStatus::NoParticipation => format!("{count} people"),
        _ => format!("{count} participants"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_labels_differ_by_outcome() {
        assert_eq!(count_label(MeetingStatus::Late, 4), "4 participants");
        assert_eq!(count_label(MeetingStatus::NoParticipation, 1), "1 people");
    }

    #[test]
    fn only_late_and_unattended_need_names() {
        assert!(needs_participants(MeetingStatus::Late));
        assert!(needs_participants(MeetingStatus::NoParticipation));
        assert!(!needs_participants(MeetingStatus::OnTime));
        assert!(!needs_participants(MeetingStatus::NotStarted));
    }
}
