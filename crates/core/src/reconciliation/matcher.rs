//! Scheduled-to-session matching.

use chrono::{DateTime, Utc};
use slotwatch_domain::constants::MATCH_TOLERANCE_MINUTES;
use slotwatch_domain::{MatchPolicy, SessionRecord};

/// Signed whole minutes from `scheduled` to `actual`, truncated toward zero.
pub fn delay_minutes(scheduled: DateTime<Utc>, actual: DateTime<Utc>) -> i64 {
    (actual - scheduled).num_minutes()
}

/// First-match scanner over the sessions of one run.
///
/// Sessions are scanned in the order the upstream reported them and the
/// first one within the tolerance window wins, even if a later one is
/// closer. Under [`MatchPolicy::Exclusive`] a matched session is retired from
/// the pool; under [`MatchPolicy::Reusable`] it stays available.
#[derive(Debug)]
pub struct SessionMatcher<'a> {
    sessions: &'a [SessionRecord],
    consumed: Vec<bool>,
    policy: MatchPolicy,
    tolerance_minutes: i64,
}

impl<'a> SessionMatcher<'a> {
    pub fn new(sessions: &'a [SessionRecord], policy: MatchPolicy) -> Self {
        Self {
            sessions,
            consumed: vec![false; sessions.len()],
            policy,
            tolerance_minutes: MATCH_TOLERANCE_MINUTES,
        }
    }

    pub fn find_match(&mut self, scheduled_at: DateTime<Utc>) -> Option<&'a SessionRecord> {
        let tolerance = self.tolerance_minutes;
        let sessions = self.sessions;
        let index = sessions.iter().enumerate().position(|(i, session)| {
            !self.consumed[i] && delay_minutes(scheduled_at, session.started_at).abs() <= tolerance
        })?;

        if self.policy == MatchPolicy::Exclusive {
            self.consumed[index] = true;
        }
        sessions.get(index)
    }
}
