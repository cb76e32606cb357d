//! Shared helpers for the binary and the HTTP layer.

pub mod logging;
