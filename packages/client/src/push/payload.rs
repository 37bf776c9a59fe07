//! Push payload decoding and the notification shown to the user.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title used when the payload carries none
pub const DEFAULT_TITLE: &str = "Taskflow";
pub const NOTIFICATION_ICON: &str = "/favicon.png";
pub const NOTIFICATION_BADGE: &str = "/badge.png";
/// Key of the deep link inside the data bag
pub const ACTION_URL_KEY: &str = "actionUrl";

/// Payload delivered by the push platform
///
/// Every field is optional. Decoding never fails: anything that is not a JSON
/// object yields the default, and fields of the wrong type are treated as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl PushPayload {
    /// Decode a raw push body
    pub fn parse(raw: Option<&[u8]>) -> Self {
        let Some(bytes) = raw else {
            return Self::default();
        };

        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                tracing::debug!("Push payload is not JSON, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Pick the known fields out of an already decoded payload
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        Self {
            title: object
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string),
            body: object
                .get("body")
                .and_then(Value::as_str)
                .map(str::to_string),
            data: object.get("data").and_then(Value::as_object).cloned(),
        }
    }
}

/// Notification as presented to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayedNotification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub data: Map<String, Value>,
}

impl DisplayedNotification {
    /// Deep link to follow on click, if any
    pub fn action_url(&self) -> Option<&str> {
        self.data.get(ACTION_URL_KEY).and_then(Value::as_str)
    }
}

impl From<PushPayload> for DisplayedNotification {
    fn from(payload: PushPayload) -> Self {
        Self {
            title: payload.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: payload.body.unwrap_or_default(),
            icon: NOTIFICATION_ICON.to_string(),
            badge: NOTIFICATION_BADGE.to_string(),
            data: payload.data.unwrap_or_default(),
        }
    }
}
