//! Push notification delivery.
//!
//! Independent of the chat connection: the worker is invoked with a raw push
//! body, presents the notification and routes clicks on it.

mod payload;
mod terminal;
mod worker;

pub use payload::{
    ACTION_URL_KEY, DEFAULT_TITLE, DisplayedNotification, NOTIFICATION_BADGE, NOTIFICATION_ICON,
    PushPayload,
};
pub use terminal::{TerminalOpener, TerminalPresenter};
pub use worker::{
    ClickOutcome, ClientOpener, NotificationPresenter, PendingOperation, PushError, PushWorker,
};
