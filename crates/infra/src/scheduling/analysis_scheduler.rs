//! Cron scheduler for the periodic analysis and the daily summaries.
//!
//! One job runs the full analysis on `analysis_cron`; one job per entry in
//! `summary_crons` posts the daily summary. Triggers are evaluated in the
//! reporting timezone. Join handles are tracked, cancellation is explicit,
//! and every job execution is wrapped in a timeout.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono_tz::Tz;
use sha2::{Digest, Sha256};
use slotwatch_core::AnalysisService;
use slotwatch_domain::{ScheduleConfig, SlotwatchError};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::scheduling::error::{SchedulerError, SchedulerResult};

const EMAIL_HASH_SALT: &str = "slotwatch.mailbox.v1";

/// Work triggered by the scheduler.
#[async_trait]
pub trait AnalysisJobs: Send + Sync {
    /// Periodic full analysis for the default person.
    async fn run_analysis(&self) -> Result<(), SlotwatchError>;

    /// Daily summary for the default person.
    async fn send_summary(&self) -> Result<(), SlotwatchError>;
}

#[async_trait]
impl AnalysisJobs for AnalysisService {
    async fn run_analysis(&self) -> Result<(), SlotwatchError> {
        let report = self.run_full_analysis(None).await?;
        let mailbox = self
            .team()
            .get(&report.person_key)
            .and_then(|m| m.session_email())
            .map_or_else(|| "-".to_string(), redact_email);
        info!(
            person = %report.person_key,
            mailbox = %mailbox,
            total = report.total,
            score = report.performance_score,
            degraded = report.is_degraded(),
            "Scheduled analysis finished"
        );
        Ok(())
    }

    async fn send_summary(&self) -> Result<(), SlotwatchError> {
        let report = self.send_daily_summary(None).await?;
        info!(person = %report.person_key, total = report.total, "Daily summary sent");
        Ok(())
    }
}

/// Stable pseudonym for a mailbox, safe to write to logs.
pub fn redact_email(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(EMAIL_HASH_SALT.as_bytes());
    hasher.update(email.trim().to_lowercase().as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("mbx-{}", &digest[..12])
}

/// Configuration for the analysis scheduler.
#[derive(Debug, Clone)]
pub struct AnalysisSchedulerConfig {
    pub analysis_cron: String,
    pub summary_crons: Vec<String>,
    /// Timezone the cron expressions are evaluated in.
    pub timezone: Tz,
    /// Run the analysis once right after `start`.
    pub run_on_startup: bool,
    /// Timeout applied to a single job execution.
    pub job_timeout: Duration,
    pub start_timeout: Duration,
    pub stop_timeout: Duration,
    pub join_timeout: Duration,
}

impl Default for AnalysisSchedulerConfig {
    fn default() -> Self {
        Self::from_config(&ScheduleConfig::default(), Tz::UTC)
    }
}

impl AnalysisSchedulerConfig {
    pub fn from_config(schedule: &ScheduleConfig, timezone: Tz) -> Self {
        Self {
            analysis_cron: schedule.analysis_cron.clone(),
            summary_crons: schedule.summary_crons.clone(),
            timezone,
            run_on_startup: schedule.run_on_startup,
            job_timeout: Duration::from_secs(schedule.job_timeout_secs),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
            join_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum JobKind {
    Analysis,
    Summary,
}

impl JobKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Summary => "summary",
        }
    }
}

/// Scheduler with explicit lifecycle management.
pub struct AnalysisScheduler {
    scheduler: Arc<RwLock<Option<JobScheduler>>>,
    config: AnalysisSchedulerConfig,
    monitor_handle: Option<JoinHandle<()>>,
    startup_handle: Option<JoinHandle<()>>,
    cancellation: CancellationToken,
    jobs: Arc<dyn AnalysisJobs>,
}

impl AnalysisScheduler {
    pub fn new(config: AnalysisSchedulerConfig, jobs: Arc<dyn AnalysisJobs>) -> Self {
        Self {
            scheduler: Arc::new(RwLock::new(None)),
            config,
            monitor_handle: None,
            startup_handle: None,
            cancellation: CancellationToken::new(),
            jobs,
        }
    }

    /// Register the jobs, start the scheduler and spawn the monitor task.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();

        let scheduler_instance = self.build_scheduler().await?;
        let start_timeout = self.config.start_timeout;
        tokio::time::timeout(start_timeout, scheduler_instance.start())
            .await
            .map_err(|source| SchedulerError::Timeout { duration: start_timeout, source })?
            .map_err(|source| SchedulerError::StartFailed { source })?;

        *self.scheduler.write().await = Some(scheduler_instance);

        let cancel = self.cancellation.clone();
        self.monitor_handle = Some(tokio::spawn(async move {
            cancel.cancelled().await;
            debug!("Analysis scheduler monitor cancelled");
        }));

        if self.config.run_on_startup {
            let cancel = self.cancellation.clone();
            let jobs = self.jobs.clone();
            let timeout = self.config.job_timeout;
            self.startup_handle = Some(tokio::spawn(async move {
                tokio::select! {
                    () = cancel.cancelled() => debug!("Startup analysis cancelled"),
                    () = execute(JobKind::Analysis, jobs, timeout) => {}
                }
            }));
        }

        info!(
            analysis = %self.config.analysis_cron,
            summaries = self.config.summary_crons.len(),
            timezone = %self.config.timezone,
            "Analysis scheduler started"
        );
        Ok(())
    }

    /// Stop the scheduler and wait for spawned tasks to finish.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation.cancel();

        let Some(mut scheduler) = self.scheduler.write().await.take() else {
            return Err(SchedulerError::NotRunning);
        };

        let stop_timeout = self.config.stop_timeout;
        tokio::time::timeout(stop_timeout, scheduler.shutdown())
            .await
            .map_err(|source| SchedulerError::Timeout { duration: stop_timeout, source })?
            .map_err(|source| SchedulerError::StopFailed { source })?;

        let join_timeout = self.config.join_timeout;
        for handle in [self.monitor_handle.take(), self.startup_handle.take()].into_iter().flatten()
        {
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|source| SchedulerError::Timeout { duration: join_timeout, source })??;
        }

        info!("Analysis scheduler stopped");
        Ok(())
    }

    /// Returns true when the monitor task is active.
    pub fn is_running(&self) -> bool {
        self.monitor_handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    async fn build_scheduler(&self) -> SchedulerResult<JobScheduler> {
        let scheduler =
            JobScheduler::new().await.map_err(|source| SchedulerError::CreationFailed { source })?;

        self.register(&scheduler, &self.config.analysis_cron, JobKind::Analysis).await?;
        for cron in &self.config.summary_crons {
            self.register(&scheduler, cron, JobKind::Summary).await?;
        }

        Ok(scheduler)
    }

    async fn register(
        &self,
        scheduler: &JobScheduler,
        cron: &str,
        kind: JobKind,
    ) -> SchedulerResult<()> {
        let jobs = self.jobs.clone();
        let timeout = self.config.job_timeout;

        let job = Job::new_async_tz(cron, self.config.timezone, move |_id, _lock| {
            let jobs = jobs.clone();
            Box::pin(async move { execute(kind, jobs, timeout).await })
        })
        .map_err(|source| SchedulerError::JobRegistrationFailed { cron: cron.to_string(), source })?;

        let job_id = job.guid();
        scheduler
            .add(job)
            .await
            .map_err(|source| SchedulerError::JobRegistrationFailed { cron: cron.to_string(), source })?;

        debug!(cron, job = kind.label(), job_id = %job_id, "Registered scheduled job");
        Ok(())
    }
}

async fn execute(kind: JobKind, jobs: Arc<dyn AnalysisJobs>, timeout: Duration) {
    let started = Instant::now();
    let run = async {
        match kind {
            JobKind::Analysis => jobs.run_analysis().await,
            JobKind::Summary => jobs.send_summary().await,
        }
    };

    match tokio::time::timeout(timeout, run).await {
        Ok(Ok(())) => {
            debug!(job = kind.label(), elapsed_ms = started.elapsed().as_millis(), "Job finished");
        }
        Ok(Err(err)) => {
            error!(job = kind.label(), error = %err, "Scheduled job failed");
        }
        Err(_) => {
            warn!(job = kind.label(), timeout_secs = timeout.as_secs(), "Scheduled job timed out");
        }
    }
}

impl Drop for AnalysisScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("AnalysisScheduler dropped while running; cancelling tasks");
            self.cancellation.cancel();
        }
    }
}
