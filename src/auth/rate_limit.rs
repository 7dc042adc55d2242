use std::collections::HashMap;
use tokio::sync::RwLock;
use chrono::{DateTime, Duration, Utc};

/// Outcome of a resend cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied { retry_after_secs: i64 },
}

/// Per-email cooldown for confirmation-code resends.
///
/// The map records the instant of the last *successful* resend for each
/// email; entries live for the process lifetime. `check` and `record` are
/// separate so that a failed provider call never starts the cooldown.
pub struct ResendGate {
    last_sent: RwLock<HashMap<String, DateTime<Utc>>>,
    cooldown: Duration,
}

impl ResendGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            last_sent: RwLock::new(HashMap::new()),
            cooldown,
        }
    }

    /// Check whether `email` may resend right now.
    pub async fn check(&self, email: &str) -> Decision {
        self.check_at(email, Utc::now()).await
    }

    /// Record a successful resend for `email` at the current instant.
    pub async fn record(&self, email: &str) {
        self.record_at(email, Utc::now()).await;
    }

    async fn check_at(&self, email: &str, now: DateTime<Utc>) -> Decision {
        let last_sent = self.last_sent.read().await;
        match last_sent.get(email) {
            None => Decision::Allowed,
            Some(last) => {
                let elapsed = now.signed_duration_since(*last);
                if elapsed >= self.cooldown {
                    Decision::Allowed
                } else {
                    let remaining_ms = (self.cooldown - elapsed).num_milliseconds();
                    // Round up so the caller never retries a second early.
                    let retry_after_secs = (remaining_ms + 999) / 1000;
                    Decision::Denied { retry_after_secs }
                }
            }
        }
    }

    async fn record_at(&self, email: &str, now: DateTime<Utc>) {
        let mut last_sent = self.last_sent.write().await;
        last_sent.insert(email.to_string(), now);
    }
}

impl Default for ResendGate {
    fn default() -> Self {
        Self::new(Duration::seconds(60))
    }
}
