//! Wire types for the Zoom token and report endpoints.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MeetingReportPage {
    #[serde(default)]
    pub meetings: Vec<ReportedMeeting>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportedMeeting {
    pub uuid: String,
    pub id: serde_json::Value,
    #[serde(default)]
    pub topic: Option<String>,
    pub start_time: String,
    #[serde(default)]
    pub participants_count: Option<u32>,
}

impl ReportedMeeting {
    /// Numeric meeting ids are rendered without quotes.
    pub fn session_id(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ParticipantsPage {
    #[serde(default)]
    pub participants: Vec<ReportedParticipant>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportedParticipant {
    #[serde(default)]
    pub name: Option<String>,
}
