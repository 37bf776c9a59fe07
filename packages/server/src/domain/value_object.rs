//! Value objects of the realtime messaging domain.

use std::{fmt, str::FromStr};

use uuid::Uuid;

use super::error::ValueObjectError;

/// Prefix of the per-user notification topic room key.
pub const NOTIFICATION_TOPIC_PREFIX: &str = "notif:";

/// Identifier of one live connection, assigned by the transport on connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh random connection ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ConnectionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for ConnectionId {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ValueObjectError::InvalidConnectionId(s.to_string()))
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Key of a broadcast room.
///
/// Either a caller-supplied chat room ID or a notification topic derived from
/// a user ID (`notif:{user_id}`). Any non-empty string is a valid key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomKey(String);

impl RoomKey {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyRoomKey);
        }
        Ok(Self(value))
    }

    /// Notification topic room of the given user
    pub fn notification_topic(user_id: &UserId) -> Self {
        Self(format!("{}{}", NOTIFICATION_TOPIC_PREFIX, user_id.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomKey {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an application user (owner of a notification topic).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyUserId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_key_accepts_any_non_empty_string() {
        // テスト項目: 空でない文字列であれば形式を問わず RoomKey として受け付ける
        // given (前提条件):
        let values = ["room-1", " ", "プロジェクト/42", "notif:"];

        // when (操作):
        let keys: Vec<_> = values
            .iter()
            .map(|v| RoomKey::new(v.to_string()))
            .collect();

        // then (期待する結果):
        assert!(keys.iter().all(Result::is_ok));
    }

    #[test]
    fn test_room_key_rejects_empty_string() {
        // テスト項目: 空文字列は RoomKey として拒否される
        // given (前提条件):
        let value = String::new();

        // when (操作):
        let result = RoomKey::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyRoomKey));
    }

    #[test]
    fn test_notification_topic_is_prefixed_user_id() {
        // テスト項目: 通知トピックのキーは固定プレフィックス + ユーザー ID になる
        // given (前提条件):
        let user_id = UserId::new("u1".to_string()).unwrap();

        // when (操作):
        let topic = RoomKey::notification_topic(&user_id);

        // then (期待する結果):
        assert_eq!(topic.as_str(), "notif:u1");
    }

    #[test]
    fn test_user_id_rejects_empty_string() {
        // テスト項目: 空文字列は UserId として拒否される
        // given (前提条件):
        let value = String::new();

        // when (操作):
        let result = UserId::try_from(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyUserId));
    }

    #[test]
    fn test_connection_id_parses_its_display_form() {
        // テスト項目: ConnectionId は表示形式の文字列から復元でき、不正な文字列は拒否される
        // given (前提条件):
        let id = ConnectionId::generate();

        // when (操作):
        let parsed: Result<ConnectionId, _> = id.to_string().parse();
        let invalid: Result<ConnectionId, _> = "not-a-uuid".parse();

        // then (期待する結果):
        assert_eq!(parsed, Ok(id));
        assert_eq!(
            invalid,
            Err(ValueObjectError::InvalidConnectionId("not-a-uuid".to_string()))
        );
    }
}
