//! Application context - dependency injection container

use std::sync::Arc;

use slotwatch_core::{AnalysisService, AnalysisSettings};
use slotwatch_domain::{Config, Result};
use slotwatch_infra::{
    AnalysisScheduler, AnalysisSchedulerConfig, InMemoryMeetingStore, InMemorySnapshotStore,
    SlackNotifier, UpstreamSourceFactory,
};
use tracing::{info, warn};

/// Shared state handed to every request handler.
///
/// Cloning is cheap; the service and config live behind `Arc`s.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub service: Arc<AnalysisService>,
}

impl AppContext {
    /// Wire the production adapters: Calendly and Zoom sources, in-memory
    /// stores and the Slack notifier.
    pub fn new(config: Config) -> Result<Self> {
        let settings = AnalysisSettings::from_config(&config.reporting)?;

        if config.team.is_empty() {
            warn!("No team members configured; every analysis request will fail");
        }

        let notifier = SlackNotifier::new(&config.notifier)?;
        if !notifier.is_configured() {
            warn!("Slack webhook not configured; reports and alerts will only be logged");
        }

        let sources = UpstreamSourceFactory::new(config.calendly.clone(), config.zoom.clone());
        let service = AnalysisService::new(
            Arc::new(config.team.clone()),
            Arc::new(sources),
            Arc::new(InMemoryMeetingStore::new()),
            Arc::new(InMemorySnapshotStore::new()),
            Arc::new(notifier),
            settings,
        );

        info!(
            members = config.team.len(),
            timezone = %config.reporting.timezone,
            match_policy = %config.reporting.match_policy,
            "Application context initialized"
        );

        Ok(Self::with_service(config, Arc::new(service)))
    }

    /// Use a pre-built service (tests, alternative adapters).
    pub fn with_service(config: Config, service: Arc<AnalysisService>) -> Self {
        Self { config: Arc::new(config), service }
    }

    /// Cron scheduler driving the periodic analysis and the daily summaries.
    pub fn scheduler(&self) -> AnalysisScheduler {
        let config = AnalysisSchedulerConfig::from_config(
            &self.config.schedule,
            self.service.settings().timezone,
        );
        AnalysisScheduler::new(config, self.service.clone())
    }
}
