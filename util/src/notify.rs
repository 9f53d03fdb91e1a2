//! Best-effort outbound notifications.
//!
//! Callers enqueue a [`Notification`] after their state change has committed.
//! A background worker owns the [`Notifier`] and delivers messages one at a
//! time; delivery failures are logged and never reach the caller.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Capacity of the queue between request handlers and the delivery worker.
pub const QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("invalid address: {0}")]
    Address(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// A single message for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Delivery backend (SMTP, logging, test doubles).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Notifier used when no mail transport is configured: writes the message to the log.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        info!(
            to = %notification.to,
            subject = %notification.subject,
            "Notification (no mail transport configured)"
        );
        Ok(())
    }
}

/// Sending half of the notification pipeline. Cheap to clone.
#[derive(Clone)]
pub struct NotificationQueue {
    tx: mpsc::Sender<Notification>,
}

impl NotificationQueue {
    /// Spawns the delivery worker on the current tokio runtime.
    ///
    /// The worker exits once every `NotificationQueue` clone has been dropped.
    pub fn spawn(notifier: Arc<dyn Notifier>) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<Notification>(QUEUE_CAPACITY);

        let handle = tokio::spawn(async move {
            while let Some(notification) = rx.recv().await {
                match notifier.send(&notification).await {
                    Ok(()) => debug!(to = %notification.to, "Notification delivered"),
                    Err(e) => warn!(
                        error = %e,
                        to = %notification.to,
                        subject = %notification.subject,
                        "Notification delivery failed"
                    ),
                }
            }
            debug!("Notification worker stopped");
        });

        (Self { tx }, handle)
    }

    /// Queues a notification without waiting. A full or closed queue drops it.
    pub fn enqueue(&self, notification: Notification) {
        if let Err(e) = self.tx.try_send(notification) {
            let dropped = match &e {
                mpsc::error::TrySendError::Full(n) | mpsc::error::TrySendError::Closed(n) => n,
            };
            warn!(to = %dropped.to, error = %e, "Notification dropped");
        }
    }
}
