//! `AnalysisService` pipeline tests with in-memory ports.

mod support;

use std::sync::Arc;

use chrono::NaiveDate;
use slotwatch_core::{AnalysisService, AnalysisSettings, FixedClock, NotificationChannel};
use slotwatch_domain::{
    AlertKind, MeetingStatus, SlotwatchError, SourceError, TeamMember, TeamRegistry,
};
use support::sources::{MockScheduleSource, MockSessionSource, MockSourceFactory};
use support::stores::{MockMeetingStore, MockSnapshotStore, RecordingNotifier};
use support::{at, meeting, session, team};

struct Harness {
    service: AnalysisService,
    schedule: Arc<MockScheduleSource>,
    sessions: Arc<MockSessionSource>,
    store: MockMeetingStore,
    snapshots: MockSnapshotStore,
    notifier: RecordingNotifier,
}

fn harness_with(team: TeamRegistry, settings: AnalysisSettings, sessions: MockSessionSource) -> Harness {
    let schedule = Arc::new(MockScheduleSource::new(vec![
        meeting("m1", at(10, 0)),
        meeting("m2", at(11, 0)),
        meeting("m3", at(13, 0)),
    ]));
    let sessions = Arc::new(sessions);
    let store = MockMeetingStore::default();
    let snapshots = MockSnapshotStore::default();
    let notifier = RecordingNotifier::default();

    let factory = MockSourceFactory::default().with_member("ada", schedule.clone(), sessions.clone());
    let service = AnalysisService::new(
        Arc::new(team),
        Arc::new(factory),
        Arc::new(store.clone()),
        Arc::new(snapshots.clone()),
        Arc::new(notifier.clone()),
        settings,
    )
    .with_clock(Arc::new(FixedClock::new(at(12, 0))));

    Harness { service, schedule, sessions, store, snapshots, notifier }
}

/// m1 starts 20 minutes late, m2 on time, m3 is still in the future.
fn harness() -> Harness {
    let sessions = MockSessionSource::new(vec![
        session("s1", at(10, 0), 20, 4),
        session("s2", at(11, 0), 1, 3),
    ])
    .with_participants("uuid/s1", &["Grace"]);
    harness_with(team(), AnalysisSettings::default(), sessions)
}

#[tokio::test]
async fn full_analysis_classifies_publishes_and_alerts() {
    let h = harness();

    let report = h.service.run_full_analysis(None).await.unwrap();

    assert_eq!(report.person_key, "ada");
    assert_eq!(report.person_name, "Ada Lovelace");
    assert_eq!(report.total, 3);
    assert_eq!(report.on_time, 1);
    assert_eq!(report.late, 1);
    assert_eq!(report.pending(), 1);
    assert_eq!(report.performance_score, 33);
    assert_eq!(report.late_details[0].participants, vec!["Grace"]);
    assert_eq!(report.critical_alerts.len(), 1);
    assert_eq!(report.performance_alert.as_ref().unwrap().kind, AlertKind::LowPerformance);
    assert!(!report.is_degraded());

    let snapshot = h.service.get_snapshot().await.unwrap().unwrap();
    assert_eq!(snapshot.date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    assert_eq!(snapshot.total, 3);
    assert_eq!(snapshot.performance_score, 33);

    let alerts = h.notifier.on(NotificationChannel::Alert);
    assert_eq!(alerts.len(), 2);
    assert!(alerts[0].contains("*LATE* - Ada Lovelace - Meeting m1"));
    assert!(alerts[1].contains("33%"));
    assert!(h.notifier.on(NotificationChannel::Report).is_empty());
    assert_eq!(h.sessions.emails(), vec!["ada@example.com"]);
}

#[tokio::test]
async fn repeated_runs_do_not_duplicate_stored_meetings() {
    let h = harness();

    h.service.run_full_analysis(Some("ada")).await.unwrap();
    let second = h.service.run_full_analysis(Some("ada")).await.unwrap();

    assert_eq!(h.store.all().len(), 3);
    assert_eq!(second.total, 3);
    assert_eq!(h.snapshots.publications(), 2);
}

#[tokio::test]
async fn stored_meetings_survive_upstream_disappearance() {
    let h = harness();
    h.service.run_full_analysis(None).await.unwrap();

    h.schedule.set_meetings(Vec::new());
    let report = h.service.run_full_analysis(None).await.unwrap();

    assert_eq!(report.total, 3);
}

#[tokio::test]
async fn failed_schedule_fetch_still_analyses_stored_meetings() {
    let h = harness();
    h.service.run_full_analysis(None).await.unwrap();

    h.schedule.fail_with(SourceError::auth("token revoked"));
    let report = h.service.run_full_analysis(None).await.unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.source_errors, vec![SourceError::auth("token revoked")]);
}

#[tokio::test]
async fn windowed_analysis_has_no_side_effects() {
    let h = harness();
    let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

    let report = h.service.run_windowed_analysis(Some("ada"), Some(day), Some(day)).await.unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.late, 1);
    assert!(h.store.all().is_empty());
    assert!(h.service.get_snapshot().await.unwrap().is_none());
    assert!(h.notifier.sent().is_empty());

    let window = h.schedule.windows()[0];
    assert_eq!(window.start_date, day);
    assert_eq!(window.end_date, day);
}

#[tokio::test]
async fn windowed_analysis_rejects_inverted_range() {
    let h = harness();
    let start = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
    let end = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

    let result = h.service.run_windowed_analysis(None, Some(start), Some(end)).await;

    assert!(matches!(result, Err(SlotwatchError::InvalidInput(_))));
}

#[tokio::test]
async fn daily_summary_posts_report() {
    let h = harness();

    let report = h.service.send_daily_summary(None).await.unwrap();

    let reports = h.notifier.on(NotificationChannel::Report);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].starts_with("*Daily meeting report*"));
    assert!(reports[0].contains("*Performance: 33%*"));
    assert_eq!(report.total, 3);
}

#[tokio::test]
async fn daily_summary_surfaces_delivery_failure_after_publishing() {
    let h = harness();
    h.notifier.set_failing(true);

    let result = h.service.send_daily_summary(None).await;

    assert!(matches!(result, Err(SlotwatchError::Network(_))));
    assert_eq!(h.snapshots.publications(), 1);
}

#[tokio::test]
async fn degraded_sessions_mark_meetings_not_started() {
    let h = harness();
    h.sessions.fail_sessions_with(SourceError::transport("connection reset"));

    let report = h.service.run_full_analysis(None).await.unwrap();

    assert_eq!(report.not_started, 2);
    assert_eq!(report.details[2].status, MeetingStatus::Scheduled);
    assert!(report.source_errors.contains(&SourceError::transport("connection reset")));
}

#[tokio::test]
async fn unknown_person_is_not_found() {
    let h = harness();

    let result = h.service.run_full_analysis(Some("nobody")).await;

    assert!(matches!(result, Err(SlotwatchError::NotFound(_))));
    assert_eq!(h.snapshots.publications(), 0);
}

#[tokio::test]
async fn configured_default_person_is_used_when_none_given() {
    let settings = AnalysisSettings { default_person: Some("grace".into()), ..AnalysisSettings::default() };
    let h = harness_with(team(), settings, MockSessionSource::default());

    let report = h.service.run_full_analysis(None).await.unwrap();

    assert_eq!(report.person_key, "grace");
    assert_eq!(report.total, 0);
    assert_eq!(report.performance_score, 100);
    assert!(report.performance_alert.is_none());
}

#[tokio::test]
async fn member_without_mailbox_degrades_with_missing_credentials() {
    let team = TeamRegistry::new(vec![TeamMember::new("ada", "Ada")]).unwrap();
    let h = harness_with(team, AnalysisSettings::default(), MockSessionSource::default());

    let report = h.service.run_full_analysis(None).await.unwrap();

    assert!(matches!(report.source_errors[0], SourceError::MissingCredentials { .. }));
    assert!(h.sessions.emails().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_full_runs_serialize_store_writes() {
    let h = harness();

    let (a, b) = tokio::join!(
        h.service.run_full_analysis(None),
        h.service.run_full_analysis(None)
    );

    assert_eq!(a.unwrap().total, 3);
    assert_eq!(b.unwrap().total, 3);
    assert_eq!(h.store.all().len(), 3);
    assert_eq!(h.snapshots.publications(), 2);
}
