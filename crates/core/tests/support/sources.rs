//! Mock upstream sources and adapter factory.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use slotwatch_core::{ScheduleSource, SessionSource, SourceFactory};
use slotwatch_domain::{
    FetchOutcome, ResolvedWindow, ScheduledMeeting, SessionRecord, SourceError, TeamMember,
};

/// In-memory `ScheduleSource`.
///
/// Returns the seeded meetings that start inside the requested window, or a
/// degraded outcome when a failure is configured.
#[derive(Default)]
pub struct MockScheduleSource {
    meetings: Mutex<Vec<ScheduledMeeting>>,
    failure: Mutex<Option<SourceError>>,
    windows: Mutex<Vec<ResolvedWindow>>,
}

impl MockScheduleSource {
    pub fn new(meetings: Vec<ScheduledMeeting>) -> Self {
        Self { meetings: Mutex::new(meetings), ..Self::default() }
    }

    pub fn set_meetings(&self, meetings: Vec<ScheduledMeeting>) {
        *self.meetings.lock().unwrap() = meetings;
    }

    pub fn fail_with(&self, error: SourceError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn windows(&self) -> Vec<ResolvedWindow> {
        self.windows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScheduleSource for MockScheduleSource {
    async fn fetch_scheduled(&self, window: &ResolvedWindow) -> FetchOutcome<ScheduledMeeting> {
        self.windows.lock().unwrap().push(*window);
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return FetchOutcome::failed(error);
        }
        FetchOutcome::Complete(
            self.meetings
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.scheduled_at >= window.starts_at && m.scheduled_at <= window.ends_at)
                .cloned()
                .collect(),
        )
    }
}

/// In-memory `SessionSource` that also tracks participant lookup
/// concurrency.
#[derive(Default)]
pub struct MockSessionSource {
    sessions: Mutex<Vec<SessionRecord>>,
    session_failure: Mutex<Option<SourceError>>,
    participants: Mutex<HashMap<String, Vec<String>>>,
    participant_delays: Mutex<HashMap<String, Duration>>,
    failing_participants: Mutex<Vec<String>>,
    emails: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    participant_calls: AtomicUsize,
}

impl MockSessionSource {
    pub fn new(sessions: Vec<SessionRecord>) -> Self {
        Self { sessions: Mutex::new(sessions), ..Self::default() }
    }

    pub fn with_participants(self, uuid: &str, names: &[&str]) -> Self {
        self.participants
            .lock()
            .unwrap()
            .insert(uuid.to_string(), names.iter().map(|n| (*n).to_string()).collect());
        self
    }

    pub fn with_participant_delay(self, uuid: &str, delay: Duration) -> Self {
        self.participant_delays.lock().unwrap().insert(uuid.to_string(), delay);
        self
    }

    pub fn with_failing_participants(self, uuid: &str) -> Self {
        self.failing_participants.lock().unwrap().push(uuid.to_string());
        self
    }

    pub fn fail_sessions_with(&self, error: SourceError) {
        *self.session_failure.lock().unwrap() = Some(error);
    }

    pub fn emails(&self) -> Vec<String> {
        self.emails.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn participant_calls(&self) -> usize {
        self.participant_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionSource for MockSessionSource {
    async fn authenticate(&self) -> Result<String, SourceError> {
        Ok("mock-token".to_string())
    }

    async fn get_sessions(
        &self,
        email: &str,
        _window: &ResolvedWindow,
    ) -> FetchOutcome<SessionRecord> {
        self.emails.lock().unwrap().push(email.to_string());
        if let Some(error) = self.session_failure.lock().unwrap().clone() {
            return FetchOutcome::failed(error);
        }
        FetchOutcome::Complete(self.sessions.lock().unwrap().clone())
    }

    async fn get_participants(&self, session_uuid: &str) -> FetchOutcome<String> {
        self.participant_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = self.participant_delays.lock().unwrap().get(session_uuid).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_participants.lock().unwrap().iter().any(|u| u == session_uuid) {
            return FetchOutcome::failed(SourceError::transport("participants unavailable"));
        }
        FetchOutcome::Complete(
            self.participants.lock().unwrap().get(session_uuid).cloned().unwrap_or_default(),
        )
    }
}

/// Factory handing out the per-member mocks registered on it.
#[derive(Default, Clone)]
pub struct MockSourceFactory {
    schedules: HashMap<String, Arc<MockScheduleSource>>,
    sessions: HashMap<String, Arc<MockSessionSource>>,
}

impl MockSourceFactory {
    pub fn with_member(
        mut self,
        key: &str,
        schedule: Arc<MockScheduleSource>,
        sessions: Arc<MockSessionSource>,
    ) -> Self {
        self.schedules.insert(key.to_string(), schedule);
        self.sessions.insert(key.to_string(), sessions);
        self
    }
}

impl SourceFactory for MockSourceFactory {
    fn schedule_source(&self, member: &TeamMember) -> Arc<dyn ScheduleSource> {
        let source = self.schedules.get(&member.key).cloned().unwrap_or_default();
        source
    }

    fn session_source(&self, member: &TeamMember) -> Arc<dyn SessionSource> {
        let source = self.sessions.get(&member.key).cloned().unwrap_or_default();
        source
    }
}
