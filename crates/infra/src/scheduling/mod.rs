//! Cron-based scheduling of the periodic analysis and daily summaries.
//!
//! The scheduler follows the runtime rules used across the infrastructure
//! layer:
//! - Explicit lifecycle management (start/stop)
//! - Join handles for spawned tasks
//! - Cancellation token support
//! - Timeout wrapping on every job execution

pub mod analysis_scheduler;
pub mod error;

pub use analysis_scheduler::{
    redact_email, AnalysisJobs, AnalysisScheduler, AnalysisSchedulerConfig,
};
pub use error::{SchedulerError, SchedulerResult};
