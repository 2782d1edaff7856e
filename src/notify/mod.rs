//! Notification sinks
//!
//! A notifier is fire-and-forget: delivery failures are logged and never
//! reach the pipeline.

mod log;
mod telegram;

pub use self::log::LogNotifier;
pub use telegram::TelegramNotifier;

use crate::config::{MessagingCredentials, NotifierConfig};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

/// Best-effort delivery of one text message
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str);
}

/// Builds the notifier for a run
///
/// Returns a `TelegramNotifier` when messaging credentials were resolved and a
/// `LogNotifier` otherwise.
pub fn build_notifier(
    client: Client,
    config: &NotifierConfig,
    credentials: Option<MessagingCredentials>,
) -> Arc<dyn Notifier> {
    match credentials {
        Some(credentials) => Arc::new(TelegramNotifier::new(
            client,
            &config.endpoint,
            credentials,
        )),
        None => Arc::new(LogNotifier),
    }
}
