use crate::notify::Notifier;
use async_trait::async_trait;

/// Writes notifications to the log; used when messaging is disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &str) {
        tracing::info!("Notification: {}", message);
    }
}
