//! Zoom report API adapter (server-to-server OAuth).

pub mod auth;
pub mod client;
mod types;

pub use auth::ZoomTokenProvider;
pub use client::ZoomClient;
