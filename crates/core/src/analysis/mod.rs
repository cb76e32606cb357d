//! Analysis pipeline: ports, aggregation, alerts, formatting and the
//! orchestrating service.

pub mod aggregator;
pub mod alerts;
pub mod ports;
pub mod report_format;
pub mod service;

pub use service::{AnalysisService, AnalysisSettings};
