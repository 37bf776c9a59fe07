//! Message formatting utilities for client display.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the greeting sent by the server after the upgrade
    pub fn format_connected(connection_id: &str) -> String {
        format!("\nConnected as {}\n", connection_id)
    }

    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `sender` - Connection id of the sender
    /// * `message` - Message body; strings are shown as-is, anything else as JSON
    /// * `timestamp` - RFC 3339 timestamp stamped by the server
    /// * `is_me` - Whether this client sent the message
    pub fn format_chat_message(
        sender: &str,
        message: &Value,
        timestamp: &str,
        is_me: bool,
    ) -> String {
        let me_suffix = if is_me { " (me)" } else { "" };
        let content = match message {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        format!(
            "\n\n------------------------------------------------------------\n\
             @{}{}: {}\n\
             sent at {}\n\
             ------------------------------------------------------------\n",
            sender,
            me_suffix,
            content,
            Self::format_timestamp(timestamp)
        )
    }

    /// Format a typing indicator
    pub fn format_typing(sender: &str) -> String {
        format!("\n... {} is typing\n", sender)
    }

    /// Format the local confirmation of a room join
    pub fn format_joined(room: &str) -> String {
        format!("\n+ joined '{}'\n", room)
    }

    /// Format the local confirmation of a notification subscription
    pub fn format_subscribed(user_id: &str) -> String {
        format!("\n+ receiving notifications for '{}'\n", user_id)
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    fn format_timestamp(timestamp: &str) -> String {
        match DateTime::parse_from_rfc3339(timestamp) {
            Ok(dt) => dt
                .with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            Err(_) => timestamp.to_string(),
        }
    }
}
