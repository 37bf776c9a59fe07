//! Push delivery worker.
//!
//! Runs detached from any live connection. Each invocation is spawned on the
//! Tokio runtime and handed back as a [`PendingOperation`], which the calling
//! platform shim awaits so the surrounding event stays open until the work is
//! done.

use std::{future::IntoFuture, sync::Arc};

use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt};
use thiserror::Error;
use tokio::task::JoinHandle;

use super::payload::{DisplayedNotification, PushPayload};

/// Push worker errors
#[derive(Debug, Error)]
pub enum PushError {
    /// The platform could not show or close a notification
    #[error("Failed to present notification: {0}")]
    Presentation(String),

    /// The platform could not focus or open a client view
    #[error("Failed to open '{url}': {reason}")]
    Open { url: String, reason: String },

    /// The spawned task panicked or was cancelled
    #[error("Push task did not complete: {0}")]
    Aborted(String),
}

/// Platform seam for showing notifications
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationPresenter: Send + Sync {
    async fn show(&self, notification: &DisplayedNotification) -> Result<(), PushError>;

    async fn close(&self, notification: &DisplayedNotification) -> Result<(), PushError>;
}

/// Platform seam for client views
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientOpener: Send + Sync {
    /// Focus a view already showing `url`. Returns `false` when there is none.
    async fn focus_existing(&self, url: &str) -> Result<bool, PushError>;

    async fn open_window(&self, url: &str) -> Result<(), PushError>;
}

/// Result of a notification click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An existing view showing the URL was focused
    Focused(String),
    /// A new view was opened on the URL
    Opened(String),
    /// No action URL; the notification was only closed
    Dismissed,
}

/// Handle to work the worker has started
///
/// Await it (it implements [`IntoFuture`]) to learn when the work completed.
/// Dropping it does not cancel the work.
pub struct PendingOperation<T> {
    handle: JoinHandle<Result<T, PushError>>,
}

impl<T: Send + 'static> PendingOperation<T> {
    fn spawn<F>(work: F) -> Self
    where
        F: Future<Output = Result<T, PushError>> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(work),
        }
    }

    /// Whether the work has already completed
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T: Send + 'static> IntoFuture for PendingOperation<T> {
    type Output = Result<T, PushError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        async move {
            match self.handle.await {
                Ok(result) => result,
                Err(e) => Err(PushError::Aborted(e.to_string())),
            }
        }
        .boxed()
    }
}

/// Turns push messages into displayed notifications and routes clicks
pub struct PushWorker {
    presenter: Arc<dyn NotificationPresenter>,
    opener: Arc<dyn ClientOpener>,
}

impl PushWorker {
    pub fn new(presenter: Arc<dyn NotificationPresenter>, opener: Arc<dyn ClientOpener>) -> Self {
        Self { presenter, opener }
    }

    /// Handle an incoming push message.
    ///
    /// A malformed or missing body degrades to the default notification.
    /// Must be called within a Tokio runtime.
    pub fn on_push(&self, raw: Option<&[u8]>) -> PendingOperation<DisplayedNotification> {
        self.present(PushPayload::parse(raw))
    }

    /// Present an already decoded payload.
    ///
    /// Used when the payload arrives inside another frame, e.g. a
    /// `notification` event on the chat connection.
    pub fn present(&self, payload: PushPayload) -> PendingOperation<DisplayedNotification> {
        let notification = DisplayedNotification::from(payload);
        tracing::debug!("Presenting push notification '{}'", notification.title);

        let presenter = self.presenter.clone();
        PendingOperation::spawn(async move {
            presenter.show(&notification).await?;
            Ok(notification)
        })
    }

    /// Handle a click on a displayed notification.
    ///
    /// Closes the notification, then focuses or opens the action URL if one
    /// is attached. Must be called within a Tokio runtime.
    pub fn on_notification_click(
        &self,
        notification: DisplayedNotification,
    ) -> PendingOperation<ClickOutcome> {
        let presenter = self.presenter.clone();
        let opener = self.opener.clone();
        PendingOperation::spawn(async move {
            presenter.close(&notification).await?;

            let Some(url) = notification.action_url() else {
                tracing::debug!("Notification '{}' dismissed", notification.title);
                return Ok(ClickOutcome::Dismissed);
            };

            if opener.focus_existing(url).await? {
                tracing::debug!("Focused existing view on {}", url);
                return Ok(ClickOutcome::Focused(url.to_string()));
            }

            opener.open_window(url).await?;
            tracing::debug!("Opened new view on {}", url);
            Ok(ClickOutcome::Opened(url.to_string()))
        })
    }
}
