//! # Slotwatch Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for upstream sources, stores and the
//!   notification sink
//! - The reconciliation engine (matching and classification)
//! - Aggregation, alert derivation and report formatting
//! - `AnalysisService`, the entry point used by the HTTP and cron layers
//!
//! ## Architecture Principles
//! - Only depends on `slotwatch-domain`
//! - No HTTP or storage code
//! - All external dependencies via traits

pub mod analysis;
pub mod clock;
pub mod reconciliation;

pub use analysis::ports::{
    MeetingStore, NotificationChannel, NotificationSink, ScheduleSource, SessionSource,
    SnapshotStore, SourceFactory,
};
pub use analysis::{AnalysisService, AnalysisSettings};
pub use clock::{Clock, FixedClock, SystemClock};
pub use reconciliation::{Reconciliation, ReconciliationEngine};
