//! Wire types for the Calendly API. Only the fields used are modelled.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentUserResponse {
    pub resource: CurrentUser,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentUser {
    pub uri: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScheduledEventsPage {
    #[serde(default)]
    pub collection: Vec<CalendlyEvent>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Pagination {
    pub next_page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CalendlyEvent {
    pub uri: String,
    pub name: Option<String>,
    pub start_time: String,
    pub status: Option<String>,
}

impl CalendlyEvent {
    /// Trailing path segment of the event URI.
    pub fn id(&self) -> &str {
        self.uri.trim_end_matches('/').rsplit('/').next().unwrap_or(&self.uri)
    }

    pub fn is_canceled(&self) -> bool {
        self.status.as_deref().is_some_and(|s| s.eq_ignore_ascii_case("canceled"))
    }
}
