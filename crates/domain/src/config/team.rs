//! Typed credential registry for the people whose meetings are tracked.
//!
//! Built once at startup and handed to the adapter factory. Nothing else
//! reads credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SlotwatchError};

/// Scheduling service credentials for one member
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendlyCredentials {
    #[serde(skip_serializing)]
    pub api_key: String,
    #[serde(default)]
    pub user_email: Option<String>,
}

impl fmt::Debug for CalendlyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendlyCredentials")
            .field("api_key", &"<redacted>")
            .field("user_email", &self.user_email)
            .finish()
    }
}

/// Conferencing service server-to-server OAuth credentials for one member
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZoomCredentials {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    pub account_id: String,
    /// Mailbox whose meeting reports are read.
    #[serde(default)]
    pub user_email: Option<String>,
}

impl fmt::Debug for ZoomCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("user_email", &self.user_email)
            .finish()
    }
}

/// One tracked person
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub calendly: Option<CalendlyCredentials>,
    #[serde(default)]
    pub zoom: Option<ZoomCredentials>,
}

impl TeamMember {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self { key: key.into(), name: name.into(), email: None, calendly: None, zoom: None }
    }

    /// Mailbox used for the session report, preferring the conferencing
    /// specific address.
    pub fn session_email(&self) -> Option<&str> {
        self.zoom
            .as_ref()
            .and_then(|z| z.user_email.as_deref())
            .or(self.email.as_deref())
    }
}

/// Ordered set of team members keyed by `key`.
///
/// Order is significant: the first member is the fallback default person.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TeamRegistry {
    members: Vec<TeamMember>,
}

impl TeamRegistry {
    pub fn new(members: Vec<TeamMember>) -> Result<Self> {
        let mut registry = Self::default();
        for member in members {
            registry.insert(member)?;
        }
        Ok(registry)
    }

    /// Add a member; keys are unique and case-sensitive.
    pub fn insert(&mut self, member: TeamMember) -> Result<()> {
        if member.key.trim().is_empty() {
            return Err(SlotwatchError::Config("team member key must not be empty".into()));
        }
        if self.get(&member.key).is_some() {
            return Err(SlotwatchError::Config(format!(
                "duplicate team member key '{}'",
                member.key
            )));
        }
        self.members.push(member);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.key == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut TeamMember> {
        self.members.iter_mut().find(|m| m.key == key)
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Resolve an optional person key.
    ///
    /// `None` selects `preferred_default` when given, otherwise the first
    /// member. An explicit key that is not registered is an error.
    pub fn resolve(&self, key: Option<&str>, preferred_default: Option<&str>) -> Result<&TeamMember> {
        match key {
            Some(key) => self
                .get(key)
                .ok_or_else(|| SlotwatchError::NotFound(format!("team member '{key}'"))),
            None => preferred_default
                .and_then(|k| self.get(k))
                .or_else(|| self.members.first())
                .ok_or_else(|| SlotwatchError::Config("no team members configured".into())),
        }
    }
}
