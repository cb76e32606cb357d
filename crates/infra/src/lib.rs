//! # Slotwatch Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The shared HTTP client and error conversions
//! - Calendly, Zoom and Slack adapters
//! - The upstream adapter factory
//! - In-memory meeting and snapshot stores
//! - Configuration loading
//! - The cron scheduler for periodic analysis and summaries
//!
//! ## Architecture
//! - Implements traits defined in `slotwatch-core`
//! - Contains all "impure" code (network, environment, timers)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod scheduling;
pub mod store;

pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::{
    CalendlyClient, SlackNotifier, UpstreamSourceFactory, ZoomClient, ZoomTokenProvider,
};
pub use scheduling::{AnalysisJobs, AnalysisScheduler, AnalysisSchedulerConfig, SchedulerError};
pub use store::{InMemoryMeetingStore, InMemorySnapshotStore};
