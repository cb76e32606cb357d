//! Application constants
//!
//! Centralized location for the reconciliation policy and upstream limits.

// Reconciliation policy (minutes)
pub const MATCH_TOLERANCE_MINUTES: i64 = 60;
pub const ON_TIME_THRESHOLD_MINUTES: i64 = 5;
pub const LATE_ALERT_THRESHOLD_MINUTES: i64 = 15;
pub const NOT_STARTED_GRACE_MINUTES: i64 = 10;

/// Sessions with this many participants or fewer count as unattended.
pub const MIN_ATTENDED_PARTICIPANTS: u32 = 1;

// Scoring
pub const PERFORMANCE_ALERT_THRESHOLD: u8 = 50;
pub const EMPTY_RUN_SCORE: u8 = 100;

// Upstream limits
pub const MAX_FETCHED_RECORDS: usize = 1000;
pub const SESSION_REPORT_MAX_DAYS: i64 = 30;
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

// Labels
pub const UNNAMED_PARTICIPANT: &str = "Unnamed";
