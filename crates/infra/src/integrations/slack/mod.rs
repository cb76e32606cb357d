//! Slack incoming-webhook notifier.

pub mod notifier;

pub use notifier::SlackNotifier;
