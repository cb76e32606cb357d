//! Stub upstream adapters and a router harness for API tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use slotwatch_api::{build_router, AppContext};
use slotwatch_core::{
    AnalysisService, AnalysisSettings, FixedClock, NotificationChannel, NotificationSink,
    ScheduleSource, SessionSource, SourceFactory,
};
use slotwatch_domain::{
    Config, FetchOutcome, ResolvedWindow, Result, ScheduledMeeting, SessionRecord, SourceError,
    TeamMember, TeamRegistry,
};
use slotwatch_infra::{InMemoryMeetingStore, InMemorySnapshotStore};
use tower::util::ServiceExt;

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
}

struct StaticSchedule(Vec<ScheduledMeeting>);

#[async_trait]
impl ScheduleSource for StaticSchedule {
    async fn fetch_scheduled(&self, window: &ResolvedWindow) -> FetchOutcome<ScheduledMeeting> {
        FetchOutcome::Complete(
            self.0
                .iter()
                .filter(|m| m.scheduled_at >= window.starts_at && m.scheduled_at <= window.ends_at)
                .cloned()
                .collect(),
        )
    }
}

struct StaticSessions(Vec<SessionRecord>);

#[async_trait]
impl SessionSource for StaticSessions {
    async fn authenticate(&self) -> std::result::Result<String, SourceError> {
        Ok("token".into())
    }

    async fn get_sessions(&self, _email: &str, _window: &ResolvedWindow) -> FetchOutcome<SessionRecord> {
        FetchOutcome::Complete(self.0.clone())
    }

    async fn get_participants(&self, _session_uuid: &str) -> FetchOutcome<String> {
        FetchOutcome::Complete(vec!["Grace Hopper".into()])
    }
}

struct StaticFactory {
    schedule: Arc<StaticSchedule>,
    sessions: Arc<StaticSessions>,
}

impl SourceFactory for StaticFactory {
    fn schedule_source(&self, _member: &TeamMember) -> Arc<dyn ScheduleSource> {
        self.schedule.clone()
    }

    fn session_source(&self, _member: &TeamMember) -> Arc<dyn SessionSource> {
        self.sessions.clone()
    }
}

#[derive(Clone, Default)]
pub struct RecordingSink(Arc<Mutex<Vec<(NotificationChannel, String)>>>);

impl RecordingSink {
    pub fn messages(&self) -> Vec<(NotificationChannel, String)> {
        self.0.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(&self, channel: NotificationChannel, text: &str) -> Result<()> {
        self.0.lock().unwrap().push((channel, text.to_string()));
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub sink: RecordingSink,
}

/// One member, `ada`. At 12:00 the 10:00 meeting started 20 minutes late and
/// the 11:00 meeting started on time.
pub fn app() -> TestApp {
    let mut ada = TeamMember::new("ada", "Ada Lovelace");
    ada.email = Some("ada@example.com".into());
    let team = TeamRegistry::new(vec![ada]).unwrap();

    let meetings = vec![meeting("m1", at(10, 0)), meeting("m2", at(11, 0))];
    let sessions = vec![session("s1", at(10, 20)), session("s2", at(11, 1))];

    let sink = RecordingSink::default();
    let mut config = Config::default();
    config.team = team.clone();

    let service = AnalysisService::new(
        Arc::new(team),
        Arc::new(StaticFactory {
            schedule: Arc::new(StaticSchedule(meetings)),
            sessions: Arc::new(StaticSessions(sessions)),
        }),
        Arc::new(InMemoryMeetingStore::new()),
        Arc::new(InMemorySnapshotStore::new()),
        Arc::new(sink.clone()),
        AnalysisSettings::default(),
    )
    .with_clock(Arc::new(FixedClock::new(at(12, 0))));

    let ctx = AppContext::with_service(config, Arc::new(service));
    TestApp { router: build_router(ctx), sink }
}

fn meeting(id: &str, scheduled_at: DateTime<Utc>) -> ScheduledMeeting {
    ScheduledMeeting {
        id: id.into(),
        name: format!("Meeting {id}"),
        scheduled_at,
        person_key: "ada".into(),
    }
}

fn session(id: &str, started_at: DateTime<Utc>) -> SessionRecord {
    SessionRecord {
        session_id: id.into(),
        topic: format!("Session {id}"),
        started_at,
        participant_count: 3,
        uuid: format!("uuid/{id}"),
    }
}

pub async fn request(router: &Router, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}
