//! Telegram bot API notifier

use crate::config::MessagingCredentials;
use crate::notify::Notifier;
use async_trait::async_trait;
use reqwest::Client;

/// Posts notifications to a chat through the bot API `sendMessage` method
pub struct TelegramNotifier {
    client: Client,
    endpoint: String,
    credentials: MessagingCredentials,
}

impl TelegramNotifier {
    /// Creates a notifier
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client
    /// * `endpoint` - Bot API base URL (e.g., "https://api.telegram.org")
    /// * `credentials` - Chat id and bot token
    pub fn new(client: Client, endpoint: &str, credentials: MessagingCredentials) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.endpoint, self.credentials.token
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) {
        tracing::info!("Sending notification: {}", message);

        let form = [
            ("chat_id", self.credentials.recipient_id.as_str()),
            ("text", message),
        ];

        let result = self
            .client
            .post(self.send_message_url())
            .form(&form)
            .send()
            .await;

        // The URL embeds the token, so errors are reported without it
        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Notification delivered");
            }
            Ok(response) => {
                tracing::warn!(
                    "Notification rejected with status {}",
                    response.status().as_u16()
                );
            }
            Err(e) => {
                tracing::warn!(
                    "Notification delivery failed: {}",
                    e.without_url()
                );
            }
        }
    }
}
