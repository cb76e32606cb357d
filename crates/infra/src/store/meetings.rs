use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::RwLock;
use slotwatch_core::MeetingStore;
use slotwatch_domain::{ResolvedWindow, Result, ScheduledMeeting};
use tracing::debug;

#[derive(Default)]
struct Inner {
    meetings: Vec<ScheduledMeeting>,
    ids: HashSet<String>,
}

/// Accumulates meetings across runs; the first copy of an id wins.
#[derive(Default)]
pub struct InMemoryMeetingStore {
    inner: RwLock<Inner>,
}

impl InMemoryMeetingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().meetings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MeetingStore for InMemoryMeetingStore {
    async fn merge(&self, meetings: Vec<ScheduledMeeting>) -> Result<usize> {
        let mut inner = self.inner.write();
        let mut added = 0;
        for meeting in meetings {
            if inner.ids.insert(meeting.id.clone()) {
                inner.meetings.push(meeting);
                added += 1;
            }
        }
        debug!(added, stored = inner.meetings.len(), "Merged scheduled meetings");
        Ok(added)
    }

    async fn meetings_for(
        &self,
        person_key: &str,
        window: &ResolvedWindow,
    ) -> Result<Vec<ScheduledMeeting>> {
        let inner = self.inner.read();
        Ok(inner
            .meetings
            .iter()
            .filter(|m| m.person_key == person_key)
            .filter(|m| m.scheduled_at >= window.starts_at && m.scheduled_at <= window.ends_at)
            .cloned()
            .collect())
    }
}
