//! Terminal-backed platform seams for the push worker.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    payload::DisplayedNotification,
    worker::{ClientOpener, NotificationPresenter, PushError},
};

/// Prints notifications to stdout
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    fn format_notification(notification: &DisplayedNotification) -> String {
        let mut output = String::new();
        output.push_str("\n\n************************************************************\n");
        output.push_str(&format!("[{}] {}\n", notification.icon, notification.title));
        if !notification.body.is_empty() {
            output.push_str(&format!("{}\n", notification.body));
        }
        if let Some(url) = notification.action_url() {
            output.push_str(&format!("-> {}\n", url));
        }
        output.push_str("************************************************************\n");
        output
    }
}

#[async_trait]
impl NotificationPresenter for TerminalPresenter {
    async fn show(&self, notification: &DisplayedNotification) -> Result<(), PushError> {
        print!("{}", Self::format_notification(notification));
        Ok(())
    }

    async fn close(&self, notification: &DisplayedNotification) -> Result<(), PushError> {
        tracing::debug!("Closed notification '{}'", notification.title);
        Ok(())
    }
}

/// Remembers which URLs were opened during this process
///
/// A terminal has no windows to focus, so "opening" a URL prints it and a URL
/// opened before counts as an existing view.
#[derive(Debug, Default)]
pub struct TerminalOpener {
    opened: Mutex<HashSet<String>>,
}

#[async_trait]
impl ClientOpener for TerminalOpener {
    async fn focus_existing(&self, url: &str) -> Result<bool, PushError> {
        let opened = self.opened.lock().await;
        if opened.contains(url) {
            println!("Focus: {}", url);
            return Ok(true);
        }
        Ok(false)
    }

    async fn open_window(&self, url: &str) -> Result<(), PushError> {
        self.opened.lock().await.insert(url.to_string());
        println!("Open: {}", url);
        Ok(())
    }
}
