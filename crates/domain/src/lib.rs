//! # Slotwatch Domain
//!
//! Business domain types for Slotwatch, the booked-meeting reconciliation
//! service.
//!
//! This crate contains:
//! - Meeting, session and report types
//! - Domain error types, source errors and `FetchOutcome`
//! - Configuration structures and the team credential registry
//! - Policy constants (tolerances, thresholds, caps)
//!
//! ## Architecture
//! - No dependencies on other Slotwatch crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
