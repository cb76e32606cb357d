//! Calendly adapter implementing the `ScheduleSource` port.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Method;
use slotwatch_core::ScheduleSource;
use slotwatch_domain::{
    CalendlyConfig, FetchOutcome, ResolvedWindow, Result, ScheduledMeeting, SlotwatchError,
    SourceError,
};
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};

use super::types::{CalendlyEvent, CurrentUserResponse, ScheduledEventsPage};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Scheduled-event reader for one person.
pub struct CalendlyClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
    person_key: String,
    page_size: u32,
    max_records: usize,
    user_uri: OnceCell<String>,
}

impl CalendlyClient {
    /// Build a client. A missing `api_key` yields a client whose fetches
    /// always degrade with `MissingCredentials`.
    pub fn new(config: &CalendlyConfig, person_key: &str, api_key: Option<String>) -> Result<Self> {
        let http = HttpClient::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self::with_http(http, config, person_key, api_key))
    }

    pub fn with_http(
        http: HttpClient,
        config: &CalendlyConfig,
        person_key: &str,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            person_key: person_key.to_string(),
            page_size: config.page_size,
            max_records: config.max_records,
            user_uri: OnceCell::new(),
        }
    }

    async fn current_user_uri(&self, api_key: &str) -> Result<&str> {
        let uri = self
            .user_uri
            .get_or_try_init(|| async {
                let url = format!("{}/users/me", self.base_url);
                let response: CurrentUserResponse = self
                    .http
                    .send_json(self.http.request(Method::GET, url).bearer_auth(api_key))
                    .await?;
                Ok::<_, SlotwatchError>(response.resource.uri)
            })
            .await?;
        Ok(uri.as_str())
    }

    /// Page through the events. `Ok((events, truncated))`.
    async fn fetch_pages(
        &self,
        api_key: &str,
        window: &ResolvedWindow,
    ) -> Result<(Vec<CalendlyEvent>, bool)> {
        let user_uri = self.current_user_uri(api_key).await?;
        let first = self
            .http
            .request(Method::GET, format!("{}/scheduled_events", self.base_url))
            .bearer_auth(api_key)
            .query(&[
                ("user", user_uri.to_string()),
                ("min_start_time", iso(window.starts_at)),
                ("max_start_time", iso(window.ends_at)),
                ("status", "active".to_string()),
                ("count", self.page_size.to_string()),
            ]);

        let mut page: ScheduledEventsPage = self.http.send_json(first).await?;
        let mut events = Vec::new();

        loop {
            events.append(&mut page.collection);
            let Some(next) = page.pagination.next_page.take() else {
                return Ok((events, false));
            };
            if events.len() > self.max_records {
                return Ok((events, true));
            }
            debug!(fetched = events.len(), "Following scheduled events cursor");
            page = self
                .http
                .send_json(self.http.request(Method::GET, next).bearer_auth(api_key))
                .await?;
        }
    }

    fn to_meeting(&self, event: &CalendlyEvent) -> Option<ScheduledMeeting> {
        let scheduled_at = match DateTime::parse_from_rfc3339(&event.start_time) {
            Ok(at) => at.with_timezone(&Utc),
            Err(err) => {
                warn!(event = %event.uri, error = %err, "Skipping event with malformed start time");
                return None;
            }
        };
        Some(ScheduledMeeting {
            id: event.id().to_string(),
            name: event.name.clone().unwrap_or_else(|| "Untitled meeting".to_string()),
            scheduled_at,
            person_key: self.person_key.clone(),
        })
    }
}

#[async_trait]
impl ScheduleSource for CalendlyClient {
    #[instrument(skip(self, window), fields(person = %self.person_key))]
    async fn fetch_scheduled(&self, window: &ResolvedWindow) -> FetchOutcome<ScheduledMeeting> {
        let Some(api_key) = self.api_key.as_deref() else {
            return FetchOutcome::failed(SourceError::missing(format!(
                "calendly api key for '{}'",
                self.person_key
            )));
        };

        let (events, truncated) = match self.fetch_pages(api_key, window).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "Calendly fetch failed");
                return FetchOutcome::failed(InfraError(err).into());
            }
        };

        let fetched = events.len();
        let meetings: Vec<_> = events
            .iter()
            .filter(|event| !event.is_canceled())
            .filter_map(|event| self.to_meeting(event))
            .collect();
        debug!(fetched, kept = meetings.len(), "Fetched scheduled meetings");

        if truncated {
            warn!(fetched, limit = self.max_records, "Scheduled events truncated by safety cap");
            FetchOutcome::Degraded {
                records: meetings,
                error: SourceError::Truncated { limit: self.max_records, fetched },
            }
        } else {
            FetchOutcome::Complete(meetings)
        }
    }
}

fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
