//! Zoom adapter implementing the `SessionSource` port.
//!
//! The meeting report endpoint only accepts date ranges of limited length,
//! so a window is split into chunks and each chunk is paged through with
//! `next_page_token`.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Method;
use slotwatch_core::SessionSource;
use slotwatch_domain::constants::UNNAMED_PARTICIPANT;
use slotwatch_domain::{
    FetchOutcome, ResolvedWindow, Result, SessionRecord, SlotwatchError, SourceError, ZoomConfig,
    ZoomCredentials,
};
use tracing::{debug, instrument, warn};

use super::auth::ZoomTokenProvider;
use super::types::{MeetingReportPage, ParticipantsPage, ReportedMeeting};
use crate::errors::InfraError;
use crate::http::HttpClient;

pub struct ZoomClient {
    http: HttpClient,
    api_base_url: String,
    person_key: String,
    tokens: Option<ZoomTokenProvider>,
    page_size: u32,
    participants_page_size: u32,
    max_window_days: i64,
    max_records: usize,
}

impl ZoomClient {
    /// Build a client. Without credentials every call degrades with
    /// `MissingCredentials`.
    pub fn new(
        config: &ZoomConfig,
        person_key: &str,
        credentials: Option<ZoomCredentials>,
    ) -> Result<Self> {
        let http = HttpClient::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self::with_http(http, config, person_key, credentials))
    }

    pub fn with_http(
        http: HttpClient,
        config: &ZoomConfig,
        person_key: &str,
        credentials: Option<ZoomCredentials>,
    ) -> Self {
        let tokens = credentials
            .map(|creds| ZoomTokenProvider::new(http.clone(), config.oauth_url.clone(), creds));
        Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            person_key: person_key.to_string(),
            tokens,
            page_size: config.page_size,
            participants_page_size: config.participants_page_size,
            max_window_days: config.max_window_days,
            max_records: config.max_records,
        }
    }

    fn tokens(&self) -> std::result::Result<&ZoomTokenProvider, SourceError> {
        self.tokens.as_ref().ok_or_else(|| {
            SourceError::missing(format!("zoom credentials for '{}'", self.person_key))
        })
    }

    /// Turn a request failure into a source error, dropping the token when
    /// the upstream rejected it.
    async fn source_error(&self, err: SlotwatchError) -> SourceError {
        let error: SourceError = InfraError(err).into();
        if matches!(error, SourceError::Auth { .. }) {
            if let Some(tokens) = &self.tokens {
                tokens.invalidate().await;
            }
        }
        error
    }

    /// Run `request` with the current token. When the upstream rejects it,
    /// exchange credentials again and retry once.
    async fn authorized<T, F, Fut>(
        &self,
        token: &mut String,
        request: F,
    ) -> std::result::Result<T, SourceError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let error = match request(token.clone()).await {
            Ok(value) => return Ok(value),
            Err(err) => self.source_error(err).await,
        };
        if !matches!(error, SourceError::Auth { .. }) {
            return Err(error);
        }

        debug!("Zoom rejected the access token, exchanging credentials again");
        *token = self.authenticate().await?;
        match request(token.clone()).await {
            Ok(value) => Ok(value),
            Err(err) => Err(self.source_error(err).await),
        }
    }

    async fn participants_page(&self, token: &str, session_uuid: &str) -> Result<ParticipantsPage> {
        // UUIDs may contain '/' and must be encoded twice.
        let encoded = urlencoding::encode(&urlencoding::encode(session_uuid)).into_owned();
        let url = format!("{}/report/meetings/{encoded}/participants", self.api_base_url);
        let request = self
            .http
            .request(Method::GET, url)
            .bearer_auth(token)
            .query(&[("page_size", self.participants_page_size.to_string())]);

        self.http.send_json(request).await
    }

    async fn report_page(
        &self,
        token: &str,
        email: &str,
        (from, to): (NaiveDate, NaiveDate),
        page_token: Option<&str>,
    ) -> Result<MeetingReportPage> {
        let url = format!("{}/report/users/{email}/meetings", self.api_base_url);
        let mut query = vec![
            ("page_size", self.page_size.to_string()),
            ("from", from.format("%Y-%m-%d").to_string()),
            ("to", to.format("%Y-%m-%d").to_string()),
        ];
        if let Some(next) = page_token {
            query.push(("next_page_token", next.to_string()));
        }

        self.http
            .send_json(self.http.request(Method::GET, url).bearer_auth(token).query(&query))
            .await
    }

    fn to_session(meeting: ReportedMeeting) -> Option<SessionRecord> {
        let started_at = match DateTime::parse_from_rfc3339(&meeting.start_time) {
            Ok(at) => at.with_timezone(&Utc),
            Err(err) => {
                warn!(uuid = %meeting.uuid, error = %err, "Skipping session with malformed start time");
                return None;
            }
        };
        Some(SessionRecord {
            session_id: meeting.session_id(),
            topic: meeting.topic.clone().unwrap_or_default(),
            started_at,
            participant_count: meeting.participants_count.unwrap_or(0),
            uuid: meeting.uuid,
        })
    }
}

#[async_trait]
impl SessionSource for ZoomClient {
    async fn authenticate(&self) -> std::result::Result<String, SourceError> {
        self.tokens()?.access_token().await
    }

    #[instrument(skip(self, email, window), fields(person = %self.person_key))]
    async fn get_sessions(
        &self,
        email: &str,
        window: &ResolvedWindow,
    ) -> FetchOutcome<SessionRecord> {
        let mut token = match self.authenticate().await {
            Ok(token) => token,
            Err(error) => return FetchOutcome::failed(error),
        };

        let mut sessions = Vec::new();
        let mut seen = HashSet::new();
        let mut fetched = 0usize;

        for chunk in window.date_chunks(self.max_window_days) {
            let mut page_token: Option<String> = None;
            loop {
                let cursor = page_token.as_deref();
                let page = self
                    .authorized(&mut token, |token| async move {
                        self.report_page(&token, email, chunk, cursor).await
                    })
                    .await;
                let page = match page {
                    Ok(page) => page,
                    Err(error) => {
                        warn!(from = %chunk.0, to = %chunk.1, error = %error, "Zoom meeting report failed");
                        return FetchOutcome::Degraded { records: sessions, error };
                    }
                };

                fetched += page.meetings.len();
                for meeting in page.meetings {
                    if seen.insert(meeting.uuid.clone()) {
                        sessions.extend(Self::to_session(meeting));
                    }
                }

                page_token = page.next_page_token.filter(|t| !t.is_empty());
                if page_token.is_none() {
                    break;
                }
                if fetched > self.max_records {
                    warn!(fetched, limit = self.max_records, "Zoom sessions truncated by safety cap");
                    return FetchOutcome::Degraded {
                        records: sessions,
                        error: SourceError::Truncated { limit: self.max_records, fetched },
                    };
                }
            }
        }

        debug!(sessions = sessions.len(), "Fetched Zoom sessions");
        FetchOutcome::Complete(sessions)
    }

    #[instrument(skip(self), fields(person = %self.person_key))]
    async fn get_participants(&self, session_uuid: &str) -> FetchOutcome<String> {
        let mut token = match self.authenticate().await {
            Ok(token) => token,
            Err(error) => return FetchOutcome::failed(error),
        };

        let page = self
            .authorized(&mut token, |token| async move {
                self.participants_page(&token, session_uuid).await
            })
            .await;

        match page {
            Ok(page) => FetchOutcome::Complete(
                page.participants
                    .into_iter()
                    .map(|p| {
                        p.name
                            .filter(|n| !n.trim().is_empty())
                            .unwrap_or_else(|| UNNAMED_PARTICIPANT.to_string())
                    })
                    .collect(),
            ),
            Err(error) => {
                warn!(error = %error, "Zoom participant report failed");
                FetchOutcome::failed(error)
            }
        }
    }
}
