//! Port interfaces for the analysis pipeline
//!
//! These traits define the boundaries between the reconciliation logic and
//! the upstream services, stores and notification transport.

use std::sync::Arc;

use async_trait::async_trait;
use slotwatch_domain::{
    FetchOutcome, ResolvedWindow, Result, ScheduledMeeting, SessionRecord, SourceError,
    StatsSnapshot, TeamMember,
};

/// Booked meetings for one person.
///
/// Implementations never fail outright: transport and auth failures come
/// back as [`FetchOutcome::Degraded`].
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Active (non-canceled) bookings starting inside `window`.
    async fn fetch_scheduled(&self, window: &ResolvedWindow) -> FetchOutcome<ScheduledMeeting>;
}

/// Conferencing sessions and their participants.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Obtain (or reuse) an access token.
    async fn authenticate(&self) -> std::result::Result<String, SourceError>;

    /// Sessions hosted by `email` whose dates fall inside `window`.
    async fn get_sessions(&self, email: &str, window: &ResolvedWindow)
        -> FetchOutcome<SessionRecord>;

    /// Display names of the people who joined a session. Best effort.
    async fn get_participants(&self, session_uuid: &str) -> FetchOutcome<String>;
}

/// Logical destination of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationChannel {
    /// Periodic summaries.
    Report,
    /// Critical alerts.
    Alert,
}

/// Receives formatted reports and alerts.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, channel: NotificationChannel, text: &str) -> Result<()>;
}

/// Accumulating set of scheduled meetings, deduplicated by id.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Insert meetings whose id is not yet present. Returns how many were
    /// added. Existing entries are left untouched.
    async fn merge(&self, meetings: Vec<ScheduledMeeting>) -> Result<usize>;

    /// Stored meetings of one person starting inside `window`, in insertion
    /// order.
    async fn meetings_for(
        &self,
        person_key: &str,
        window: &ResolvedWindow,
    ) -> Result<Vec<ScheduledMeeting>>;
}

/// Holder of the current statistics snapshot.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Replace the current snapshot.
    async fn publish(&self, snapshot: StatsSnapshot) -> Result<()>;

    async fn current(&self) -> Result<Option<StatsSnapshot>>;
}

/// Builds the upstream adapters for a team member.
///
/// Implementations may cache adapters so that per-instance state such as an
/// access token survives between runs.
pub trait SourceFactory: Send + Sync {
    fn schedule_source(&self, member: &TeamMember) -> Arc<dyn ScheduleSource>;

    fn session_source(&self, member: &TeamMember) -> Arc<dyn SessionSource>;
}
