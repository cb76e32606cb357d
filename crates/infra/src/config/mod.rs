//! Configuration loading
//!
//! Reads a TOML or JSON file, layers environment overrides on top and
//! builds the team registry with per-member credentials.

pub mod loader;

pub use loader::{load, load_from_file, load_with_env, probe_config_paths};
