//! Scheduling service integration (Calendly REST API v2)
//!
//! Resolves the authenticated user, then pages through their active
//! scheduled events for a window.

pub mod client;
mod types;

pub use client::CalendlyClient;
