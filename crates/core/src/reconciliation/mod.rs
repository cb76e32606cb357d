//! Reconciliation of booked meetings against conferencing sessions

pub mod classifier;
pub mod engine;
pub mod matcher;

pub use classifier::{classify, Verdict};
pub use engine::{Reconciliation, ReconciliationEngine};
pub use matcher::{delay_minutes, SessionMatcher};
