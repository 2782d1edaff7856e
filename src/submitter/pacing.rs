//! Inter-request pacing

use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Enforces a fixed minimum gap between consecutive attempts
///
/// The first attempt goes out immediately; every later one waits until
/// `interval` has passed since the previous attempt started, whatever that
/// attempt's outcome was.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    last_attempt: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_attempt: None,
        }
    }

    /// Time left before the next attempt may start
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        let last = self.last_attempt?;
        let ready_at = last + self.interval;
        (ready_at > now).then(|| ready_at - now)
    }

    /// Waits for the pacing gap, then records a new attempt
    pub async fn wait_turn(&mut self) {
        if let Some(wait) = self.time_until_next(Instant::now()) {
            sleep(wait).await;
        }
        self.last_attempt = Some(Instant::now());
    }
}
