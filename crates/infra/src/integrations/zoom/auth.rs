//! Account-credentials token exchange with an in-memory cache.
//!
//! A token is reused until shortly before its advertised `expires_in`. A
//! request rejected with 401/403 should call [`ZoomTokenProvider::invalidate`]
//! before asking for a token again.

use std::time::{Duration, Instant};

use reqwest::Method;
use slotwatch_domain::{SourceError, ZoomCredentials};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::types::TokenResponse;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Tokens are refreshed this long before they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

struct CachedToken {
    value: String,
    /// `None` when the upstream did not advertise a lifetime.
    refresh_at: Option<Instant>,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        self.refresh_at.map_or(true, |at| now < at)
    }
}

pub struct ZoomTokenProvider {
    http: HttpClient,
    oauth_url: String,
    credentials: ZoomCredentials,
    token: Mutex<Option<CachedToken>>,
}

impl ZoomTokenProvider {
    pub fn new(http: HttpClient, oauth_url: impl Into<String>, credentials: ZoomCredentials) -> Self {
        Self { http, oauth_url: oauth_url.into(), credentials, token: Mutex::new(None) }
    }

    /// Cached token, exchanging credentials when none is held or the held
    /// one is about to expire.
    pub async fn access_token(&self) -> Result<String, SourceError> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref().filter(|t| t.is_fresh(Instant::now())) {
            return Ok(token.value.clone());
        }

        let token = self.exchange().await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    /// Drop the cached token.
    pub async fn invalidate(&self) {
        if self.token.lock().await.take().is_some() {
            debug!(account = %self.credentials.account_id, "Discarded cached Zoom token");
        }
    }

    async fn exchange(&self) -> Result<CachedToken, SourceError> {
        let request = self
            .http
            .request(Method::POST, &self.oauth_url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .query(&[
                ("grant_type", "account_credentials"),
                ("account_id", self.credentials.account_id.as_str()),
            ]);

        match self.http.send_json::<TokenResponse>(request).await {
            Ok(response) => {
                info!(
                    account = %self.credentials.account_id,
                    expires_in = ?response.expires_in,
                    "Obtained Zoom access token"
                );
                let refresh_at = response.expires_in.map(|secs| {
                    Instant::now() + Duration::from_secs(secs).saturating_sub(EXPIRY_MARGIN)
                });
                Ok(CachedToken { value: response.access_token, refresh_at })
            }
            Err(err) => {
                warn!(account = %self.credentials.account_id, error = %err, "Zoom token exchange failed");
                Err(InfraError(err).into())
            }
        }
    }
}
