//! Pushover notifications.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use crate::config::NotifyConfig;

use super::Notifier;

const PUSHOVER_API_URL: &str = "https://api.pushover.net/1/messages.json";

/// Sends notifications through the Pushover messages API.
pub struct PushoverNotifier {
    token: Option<String>,
    user: Option<String>,
    api_url: String,
    client: Client,
}

impl PushoverNotifier {
    /// Create a notifier with explicit credentials.
    pub fn new(token: Option<String>, user: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            user: user.filter(|u| !u.trim().is_empty()),
            api_url: PUSHOVER_API_URL.to_string(),
            client,
        }
    }

    pub fn from_config(config: &NotifyConfig) -> Self {
        Self::new(
            config.pushover_token.clone(),
            config.pushover_user.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Point at a different endpoint.
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    /// Whether both credentials are present.
    pub fn is_configured(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn notify(&self, text: &str) -> bool {
        let (Some(token), Some(user)) = (&self.token, &self.user) else {
            warn!("Missing Pushover token or user; skipping notification");
            return false;
        };

        let form = [
            ("token", token.as_str()),
            ("user", user.as_str()),
            ("message", text),
        ];

        match self.client.post(&self.api_url).form(&form).send().await {
            Ok(response) if response.status().as_u16() >= 400 => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warn!(status = status.as_u16(), body = %body, "Pushover rejected notification");
                false
            }
            Ok(_) => {
                crate::log_component!(debug, "notify", "Pushover notification delivered");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to send Pushover notification");
                false
            }
        }
    }
}
