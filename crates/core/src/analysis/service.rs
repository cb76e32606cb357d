//! Analysis service - orchestrates fetch, reconciliation, aggregation and
//! alert dispatch.
//!
//! Two entry points drive the pipeline:
//! - [`AnalysisService::run_full_analysis`] merges fresh bookings into the
//!   accumulating store, analyses the stored meetings, publishes the
//!   snapshot and sends alerts. Full runs are serialized by a run lock so
//!   only one writer touches the store and snapshot at a time.
//! - [`AnalysisService::run_windowed_analysis`] analyses an explicit window
//!   and has no side effects.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use slotwatch_domain::constants::DEFAULT_LOOKBACK_DAYS;
use slotwatch_domain::{
    AnalysisReport, DateWindow, FetchOutcome, MatchPolicy, ReportingConfig, ResolvedWindow,
    Result, ScheduledMeeting, SourceError, StatsSnapshot, TeamMember, TeamRegistry,
};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use super::aggregator;
use super::ports::{MeetingStore, NotificationChannel, NotificationSink, SnapshotStore, SourceFactory};
use super::report_format;
use crate::clock::{Clock, SystemClock};
use crate::reconciliation::ReconciliationEngine;

/// Tunables for [`AnalysisService`].
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub timezone: Tz,
    pub lookback_days: i64,
    pub default_person: Option<String>,
    pub match_policy: MatchPolicy,
    pub participant_concurrency: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            default_person: None,
            match_policy: MatchPolicy::default(),
            participant_concurrency: 4,
        }
    }
}

impl AnalysisSettings {
    pub fn from_config(reporting: &ReportingConfig) -> Result<Self> {
        Ok(Self {
            timezone: reporting.tz()?,
            lookback_days: reporting.lookback_days,
            default_person: reporting.default_person.clone(),
            match_policy: reporting.match_policy,
            participant_concurrency: reporting.participant_concurrency,
        })
    }
}

/// Entry point for the HTTP and cron layers.
pub struct AnalysisService {
    team: Arc<TeamRegistry>,
    sources: Arc<dyn SourceFactory>,
    store: Arc<dyn MeetingStore>,
    snapshots: Arc<dyn SnapshotStore>,
    notifier: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    engine: ReconciliationEngine,
    settings: AnalysisSettings,
    run_lock: Mutex<()>,
}

impl AnalysisService {
    pub fn new(
        team: Arc<TeamRegistry>,
        sources: Arc<dyn SourceFactory>,
        store: Arc<dyn MeetingStore>,
        snapshots: Arc<dyn SnapshotStore>,
        notifier: Arc<dyn NotificationSink>,
        settings: AnalysisSettings,
    ) -> Self {
        let engine =
            ReconciliationEngine::new(settings.match_policy, settings.participant_concurrency);
        Self {
            team,
            sources,
            store,
            snapshots,
            notifier,
            clock: Arc::new(SystemClock),
            engine,
            settings,
            run_lock: Mutex::new(()),
        }
    }

    /// Replace the wall clock (tests, replays).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn team(&self) -> &TeamRegistry {
        &self.team
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Fetch, merge, reconcile, publish and alert for one person.
    #[instrument(skip(self))]
    pub async fn run_full_analysis(&self, person_key: Option<&str>) -> Result<AnalysisReport> {
        let member = self.resolve_member(person_key)?;

        let report = {
            let _guard = self.run_lock.lock().await;
            let now = self.clock.now();
            let window = self.window(DateWindow::default(), now)?;
            let mut source_errors = Vec::new();

            let fetched = self.sources.schedule_source(member).fetch_scheduled(&window).await;
            record_degradation(&fetched, "schedule", &mut source_errors);

            let added = self.store.merge(fetched.into_records()).await?;
            let meetings = self.store.meetings_for(&member.key, &window).await?;
            info!(added, stored = meetings.len(), "Merged scheduled meetings");

            let report = self.analyze(member, meetings, &window, now, source_errors).await;

            let today = now.with_timezone(&self.settings.timezone).date_naive();
            self.snapshots.publish(StatsSnapshot::from_report(&report, today)).await?;
            report
        };

        self.dispatch_alerts(&report).await;
        Ok(report)
    }

    /// Analyse an explicit window without touching the store, the snapshot
    /// or the notification sink.
    #[instrument(skip(self))]
    pub async fn run_windowed_analysis(
        &self,
        person_key: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<AnalysisReport> {
        let member = self.resolve_member(person_key)?;
        let now = self.clock.now();
        let window = self.window(DateWindow::new(start, end), now)?;
        let mut source_errors = Vec::new();

        let fetched = self.sources.schedule_source(member).fetch_scheduled(&window).await;
        record_degradation(&fetched, "schedule", &mut source_errors);

        Ok(self.analyze(member, fetched.into_records(), &window, now, source_errors).await)
    }

    pub async fn get_snapshot(&self) -> Result<Option<StatsSnapshot>> {
        self.snapshots.current().await
    }

    /// Run a full analysis and post the daily report.
    #[instrument(skip(self))]
    pub async fn send_daily_summary(&self, person_key: Option<&str>) -> Result<AnalysisReport> {
        let report = self.run_full_analysis(person_key).await?;
        let text = report_format::daily_report(&report, self.settings.timezone);
        self.notifier.send(NotificationChannel::Report, &text).await?;
        info!(person = %report.person_key, "Daily summary sent");
        Ok(report)
    }

    fn resolve_member(&self, person_key: Option<&str>) -> Result<&TeamMember> {
        self.team.resolve(person_key, self.settings.default_person.as_deref())
    }

    fn window(&self, window: DateWindow, now: DateTime<Utc>) -> Result<ResolvedWindow> {
        window.resolve(now, self.settings.timezone, self.settings.lookback_days)
    }

    async fn analyze(
        &self,
        member: &TeamMember,
        meetings: Vec<ScheduledMeeting>,
        window: &ResolvedWindow,
        now: DateTime<Utc>,
        mut source_errors: Vec<SourceError>,
    ) -> AnalysisReport {
        let session_source = self.sources.session_source(member);
        let sessions = match member.session_email() {
            Some(email) => session_source.get_sessions(email, window).await,
            None => FetchOutcome::failed(SourceError::missing(format!(
                "session mailbox for '{}'",
                member.key
            ))),
        };
        record_degradation(&sessions, "sessions", &mut source_errors);
        let sessions = sessions.into_records();

        let reconciliation = self
            .engine
            .reconcile(meetings, &sessions, session_source.as_ref(), &member.name, now)
            .await;
        let mut report = aggregator::build_report(reconciliation, &member.key, &member.name, now);

        source_errors.append(&mut report.source_errors);
        report.source_errors = source_errors;

        info!(
            person = %member.key,
            total = report.total,
            on_time = report.on_time,
            late = report.late,
            no_participation = report.no_participation,
            not_started = report.not_started,
            score = report.performance_score,
            degraded = report.is_degraded(),
            "Analysis complete"
        );
        report
    }

    async fn dispatch_alerts(&self, report: &AnalysisReport) {
        if let Some(text) = report_format::critical_alerts(&report.critical_alerts) {
            warn!(count = report.critical_alerts.len(), "Critical alerts detected");
            if let Err(err) = self.notifier.send(NotificationChannel::Alert, &text).await {
                warn!(error = %err, "Failed to deliver critical alerts");
            }
        }

        if let Some(alert) = &report.performance_alert {
            warn!(score = report.performance_score, "Performance below threshold");
            let text = report_format::performance_warning(alert, report.performance_score);
            if let Err(err) = self.notifier.send(NotificationChannel::Alert, &text).await {
                warn!(error = %err, "Failed to deliver performance alert");
            }
        }
    }
}

fn record_degradation<T>(outcome: &FetchOutcome<T>, source: &str, errors: &mut Vec<SourceError>) {
    if let Some(err) = outcome.error() {
        warn!(source, error = %err, records = outcome.records().len(), "Upstream fetch degraded");
        errors.push(err.clone());
    }
}
