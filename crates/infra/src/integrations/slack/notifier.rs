use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use slotwatch_core::{NotificationChannel, NotificationSink};
use slotwatch_domain::{NotifierConfig, Result};
use tracing::{debug, info, warn};

use crate::http::HttpClient;

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    channel: &'a str,
    username: &'a str,
    icon_emoji: &'a str,
    text: &'a str,
}

/// Posts reports and alerts to a Slack incoming webhook.
///
/// Without a webhook URL messages are logged and dropped.
pub struct SlackNotifier {
    http: HttpClient,
    webhook_url: Option<String>,
    report_channel: String,
    alert_channel: String,
    username: String,
    icon_emoji: String,
}

impl SlackNotifier {
    pub fn new(config: &NotifierConfig) -> Result<Self> {
        let http = HttpClient::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self {
            http,
            webhook_url: config.webhook_url.clone().filter(|url| !url.trim().is_empty()),
            report_channel: config.channel.clone(),
            alert_channel: config.alert_channel.clone(),
            username: config.username.clone(),
            icon_emoji: config.icon_emoji.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    fn channel_name(&self, channel: NotificationChannel) -> &str {
        match channel {
            NotificationChannel::Report => &self.report_channel,
            NotificationChannel::Alert => &self.alert_channel,
        }
    }
}

#[async_trait]
impl NotificationSink for SlackNotifier {
    async fn send(&self, channel: NotificationChannel, text: &str) -> Result<()> {
        let target = self.channel_name(channel);
        let Some(url) = self.webhook_url.as_deref() else {
            info!(channel = target, chars = text.len(), "Slack webhook not configured; dropping message");
            return Ok(());
        };

        let message = WebhookMessage {
            channel: target,
            username: &self.username,
            icon_emoji: &self.icon_emoji,
            text,
        };
        match self.http.send_expect_success(self.http.request(Method::POST, url).json(&message)).await
        {
            Ok(()) => {
                debug!(channel = target, "Slack message delivered");
                Ok(())
            }
            Err(err) => {
                warn!(channel = target, error = %err, "Slack delivery failed");
                Err(err)
            }
        }
    }
}
