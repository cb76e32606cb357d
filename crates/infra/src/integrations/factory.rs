//! Builds and caches the upstream adapters for each team member.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use slotwatch_core::{ScheduleSource, SessionSource, SourceFactory};
use slotwatch_domain::{
    CalendlyConfig, FetchOutcome, ResolvedWindow, ScheduledMeeting, SessionRecord, SourceError,
    TeamMember, ZoomConfig,
};
use tracing::{debug, error};

use super::calendly::CalendlyClient;
use super::zoom::ZoomClient;

#[derive(Clone)]
struct MemberSources {
    schedule: Arc<dyn ScheduleSource>,
    sessions: Arc<dyn SessionSource>,
}

/// Adapter factory backed by Calendly and Zoom.
///
/// Adapters are created on first use and reused, so the Zoom token and the
/// Calendly user URI survive between runs.
pub struct UpstreamSourceFactory {
    calendly: CalendlyConfig,
    zoom: ZoomConfig,
    cache: Mutex<HashMap<String, MemberSources>>,
}

impl UpstreamSourceFactory {
    pub fn new(calendly: CalendlyConfig, zoom: ZoomConfig) -> Self {
        Self { calendly, zoom, cache: Mutex::new(HashMap::new()) }
    }

    fn sources(&self, member: &TeamMember) -> MemberSources {
        let mut cache = self.cache.lock();
        if let Some(sources) = cache.get(&member.key) {
            return sources.clone();
        }

        debug!(person = %member.key, "Creating upstream adapters");
        let sources = MemberSources {
            schedule: self.build_schedule(member),
            sessions: self.build_sessions(member),
        };
        cache.insert(member.key.clone(), sources.clone());
        sources
    }

    fn build_schedule(&self, member: &TeamMember) -> Arc<dyn ScheduleSource> {
        let api_key = member.calendly.as_ref().map(|c| c.api_key.clone());
        match CalendlyClient::new(&self.calendly, &member.key, api_key) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                error!(person = %member.key, error = %err, "Failed to build Calendly client");
                Arc::new(UnavailableSource(SourceError::transport(err.to_string())))
            }
        }
    }

    fn build_sessions(&self, member: &TeamMember) -> Arc<dyn SessionSource> {
        match ZoomClient::new(&self.zoom, &member.key, member.zoom.clone()) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                error!(person = %member.key, error = %err, "Failed to build Zoom client");
                Arc::new(UnavailableSource(SourceError::transport(err.to_string())))
            }
        }
    }
}

impl SourceFactory for UpstreamSourceFactory {
    fn schedule_source(&self, member: &TeamMember) -> Arc<dyn ScheduleSource> {
        self.sources(member).schedule
    }

    fn session_source(&self, member: &TeamMember) -> Arc<dyn SessionSource> {
        self.sources(member).sessions
    }
}

/// Stand-in when an adapter could not be constructed. Every call degrades.
struct UnavailableSource(SourceError);

#[async_trait]
impl ScheduleSource for UnavailableSource {
    async fn fetch_scheduled(&self, _window: &ResolvedWindow) -> FetchOutcome<ScheduledMeeting> {
        FetchOutcome::failed(self.0.clone())
    }
}

#[async_trait]
impl SessionSource for UnavailableSource {
    async fn authenticate(&self) -> Result<String, SourceError> {
        Err(self.0.clone())
    }

    async fn get_sessions(
        &self,
        _email: &str,
        _window: &ResolvedWindow,
    ) -> FetchOutcome<SessionRecord> {
        FetchOutcome::failed(self.0.clone())
    }

    async fn get_participants(&self, _session_uuid: &str) -> FetchOutcome<String> {
        FetchOutcome::failed(self.0.clone())
    }
}
