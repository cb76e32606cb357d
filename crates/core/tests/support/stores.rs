//! In-memory store and notifier mocks.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use slotwatch_core::{MeetingStore, NotificationChannel, NotificationSink, SnapshotStore};
use slotwatch_domain::{
    ResolvedWindow, Result as DomainResult, ScheduledMeeting, SlotwatchError, StatsSnapshot,
};

#[derive(Default, Clone)]
pub struct MockMeetingStore {
    meetings: Arc<Mutex<Vec<ScheduledMeeting>>>,
}

impl MockMeetingStore {
    pub fn all(&self) -> Vec<ScheduledMeeting> {
        self.meetings.lock().unwrap().clone()
    }
}

#[async_trait]
impl MeetingStore for MockMeetingStore {
    async fn merge(&self, meetings: Vec<ScheduledMeeting>) -> DomainResult<usize> {
        let mut stored = self.meetings.lock().unwrap();
        let mut added = 0;
        for meeting in meetings {
            if !stored.iter().any(|m| m.id == meeting.id) {
                stored.push(meeting);
                added += 1;
            }
        }
        Ok(added)
    }

    async fn meetings_for(
        &self,
        person_key: &str,
        window: &ResolvedWindow,
    ) -> DomainResult<Vec<ScheduledMeeting>> {
        Ok(self
            .meetings
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.person_key == person_key)
            .filter(|m| m.scheduled_at >= window.starts_at && m.scheduled_at <= window.ends_at)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct MockSnapshotStore {
    current: Arc<Mutex<Option<StatsSnapshot>>>,
    publications: Arc<Mutex<usize>>,
}

impl MockSnapshotStore {
    pub fn publications(&self) -> usize {
        *self.publications.lock().unwrap()
    }
}

#[async_trait]
impl SnapshotStore for MockSnapshotStore {
    async fn publish(&self, snapshot: StatsSnapshot) -> DomainResult<()> {
        *self.current.lock().unwrap() = Some(snapshot);
        *self.publications.lock().unwrap() += 1;
        Ok(())
    }

    async fn current(&self) -> DomainResult<Option<StatsSnapshot>> {
        Ok(self.current.lock().unwrap().clone())
    }
}

/// Notification sink that records every message.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(NotificationChannel, String)>>>,
    failing: Arc<Mutex<bool>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(NotificationChannel, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn on(&self, channel: NotificationChannel) -> Vec<String> {
        self.sent().into_iter().filter(|(c, _)| *c == channel).map(|(_, text)| text).collect()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn send(&self, channel: NotificationChannel, text: &str) -> DomainResult<()> {
        if *self.failing.lock().unwrap() {
            return Err(SlotwatchError::Network("webhook unreachable".to_string()));
        }
        self.sent.lock().unwrap().push((channel, text.to_string()));
        Ok(())
    }
}
