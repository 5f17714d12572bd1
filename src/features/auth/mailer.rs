use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::core::error::Result;

/// Message produced by an auth flow (registration confirmation, password reset)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub link: String,
}

/// Delivery port for auth-flow messages
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<()>;
}

/// Messages kept by [`OutboxMailer`]; older ones are dropped first
const OUTBOX_CAPACITY: usize = 1000;

/// Mailer that logs each message and keeps the most recent ones in memory.
///
/// Stands in for an SMTP or provider-backed implementation.
#[derive(Default)]
pub struct OutboxMailer {
    outbox: Mutex<Vec<OutgoingMail>>,
}

impl OutboxMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages delivered so far, oldest first
    #[allow(dead_code)]
    pub async fn sent(&self) -> Vec<OutgoingMail> {
        self.outbox.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        tracing::info!(to = %mail.to, subject = %mail.subject, "Mail queued: {}", mail.link);
        let mut outbox = self.outbox.lock().await;
        if outbox.len() >= OUTBOX_CAPACITY {
            outbox.remove(0);
        }
        outbox.push(mail);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(n: usize) -> OutgoingMail {
        OutgoingMail {
            to: format!("user{}@example.com", n),
            subject: "Confirm your account".to_string(),
            link: format!("http://localhost/confirm?n={}", n),
        }
    }

    #[tokio::test]
    async fn test_outbox_keeps_order() {
        let mailer = OutboxMailer::new();
        mailer.send(mail(1)).await.unwrap();
        mailer.send(mail(2)).await.unwrap();

        let sent = mailer.sent().await;
        assert_eq!(sent, vec![mail(1), mail(2)]);
    }

    #[tokio::test]
    async fn test_outbox_drops_oldest_when_full() {
        let mailer = OutboxMailer::new();
        for n in 0..=OUTBOX_CAPACITY {
            mailer.send(mail(n)).await.unwrap();
        }

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), OUTBOX_CAPACITY);
        assert_eq!(sent[0], mail(1));
    }
}
