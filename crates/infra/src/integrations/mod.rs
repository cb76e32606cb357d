//! External service integrations

pub mod calendly;
pub mod factory;
pub mod slack;
pub mod zoom;

pub use calendly::CalendlyClient;
pub use factory::UpstreamSourceFactory;
pub use slack::SlackNotifier;
pub use zoom::{ZoomClient, ZoomTokenProvider};
