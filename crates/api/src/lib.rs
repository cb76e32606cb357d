//! # Slotwatch API
//!
//! HTTP surface and process wiring for Slotwatch.
//!
//! - [`AppContext`] builds the analysis service from a loaded [`Config`]
//! - [`build_router`] exposes the service over axum
//! - [`utils::logging`] installs the tracing subscriber used by the binary
//!
//! [`Config`]: slotwatch_domain::Config

pub mod context;
pub mod http;
pub mod utils;

pub use context::AppContext;
pub use http::{build_router, ApiError};
