//! In-memory room registry.
//!
//! Implements the domain's `RoomRegistry` trait with two indexes kept under a
//! single lock:
//!
//! ```text
//! rooms:       RoomKey      -> { ConnectionId, ... }
//! memberships: ConnectionId -> { RoomKey, ... }
//! ```
//!
//! Rooms are created on the first join and pruned when the last member leaves,
//! so the map never holds empty entries.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RoomKey, RoomRegistry, RoomSummary, Timestamp};

struct RoomEntry {
    members: BTreeSet<ConnectionId>,
    created_at: Timestamp,
}

#[derive(Default)]
struct RegistryState {
    rooms: BTreeMap<RoomKey, RoomEntry>,
    memberships: BTreeMap<ConnectionId, BTreeSet<RoomKey>>,
}

/// In-memory `RoomRegistry`
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryRoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, connection_id: ConnectionId, room: RoomKey, joined_at: Timestamp) -> bool {
        let mut state = self.state.lock().await;

        let inserted = state
            .rooms
            .entry(room.clone())
            .or_insert_with(|| RoomEntry {
                members: BTreeSet::new(),
                created_at: joined_at,
            })
            .members
            .insert(connection_id);

        if inserted {
            state
                .memberships
                .entry(connection_id)
                .or_default()
                .insert(room.clone());
            tracing::debug!("Connection '{}' joined room '{}'", connection_id, room);
        }

        inserted
    }

    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<RoomKey> {
        let mut state = self.state.lock().await;

        let Some(rooms) = state.memberships.remove(connection_id) else {
            return Vec::new();
        };

        for room in &rooms {
            let now_empty = match state.rooms.get_mut(room) {
                Some(entry) => {
                    entry.members.remove(connection_id);
                    entry.members.is_empty()
                }
                None => false,
            };
            if now_empty {
                state.rooms.remove(room);
                tracing::debug!("Room '{}' is empty and was pruned", room);
            }
        }

        rooms.into_iter().collect()
    }

    async fn members(&self, room: &RoomKey) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(room)
            .map(|entry| entry.members.iter().copied().collect())
            .unwrap_or_default()
    }

    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomKey> {
        let state = self.state.lock().await;
        state
            .memberships
            .get(connection_id)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn list_rooms(&self) -> Vec<RoomSummary> {
        let state = self.state.lock().await;
        state
            .rooms
            .iter()
            .map(|(key, entry)| RoomSummary {
                key: key.clone(),
                members: entry.members.len(),
                created_at: entry.created_at,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRegistry の join / leave_all / members / rooms_of / list_rooms
    //
    // 【なぜこのテストが必要か】
    // - ブロードキャスト対象はこのレジストリのメンバー一覧で決まる
    // - 切断時にすべてのルームから確実に抜けること、空ルームが残らないことを保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. 存在しないルームへの join（オンデマンド作成）
    // 2. 同じルームへの重複 join（冪等性）
    // 3. チャットルームと通知トピックへの同時所属
    // 4. 切断時の leave_all と空ルームの削除
    // 5. 未知のルームのメンバー取得
    // ========================================

    fn room(key: &str) -> RoomKey {
        RoomKey::new(key.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_creates_room_on_demand() {
        // テスト項目: メンバーのいないルームへの join は黙って成功し、ルームが作成される
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();
        let alice = ConnectionId::generate();

        // when (操作):
        let joined = registry.join(alice, room("r1"), Timestamp::new(1000)).await;

        // then (期待する結果):
        assert!(joined);
        assert_eq!(registry.members(&room("r1")).await, vec![alice]);
        let rooms = registry.list_rooms().await;
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].members, 1);
        assert_eq!(rooms[0].created_at, Timestamp::new(1000));
    }

    #[tokio::test]
    async fn test_join_same_room_twice_is_idempotent() {
        // テスト項目: 同じルームへの 2 回目の join は false を返し、メンバーは重複しない
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();
        let alice = ConnectionId::generate();
        registry.join(alice, room("r1"), Timestamp::new(1000)).await;

        // when (操作):
        let joined = registry.join(alice, room("r1"), Timestamp::new(2000)).await;

        // then (期待する結果):
        assert!(!joined);
        assert_eq!(registry.members(&room("r1")).await.len(), 1);
        assert_eq!(registry.rooms_of(&alice).await, vec![room("r1")]);
    }

    #[tokio::test]
    async fn test_connection_can_belong_to_chat_room_and_topic() {
        // テスト項目: 1 つの接続がチャットルームと通知トピックに同時に所属できる
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();
        let alice = ConnectionId::generate();
        let topic = RoomKey::notification_topic(&UserId::new("u1".to_string()).unwrap());

        // when (操作):
        registry.join(alice, room("r1"), Timestamp::new(1000)).await;
        registry.join(alice, topic.clone(), Timestamp::new(1000)).await;

        // then (期待する結果):
        let rooms = registry.rooms_of(&alice).await;
        assert_eq!(rooms.len(), 2);
        assert!(rooms.contains(&room("r1")));
        assert!(rooms.contains(&topic));
    }

    #[tokio::test]
    async fn test_leave_all_removes_connection_and_prunes_empty_rooms() {
        // テスト項目: leave_all で全ルームから抜け、空になったルームだけが削除される
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        registry.join(alice, room("shared"), Timestamp::new(1000)).await;
        registry.join(bob, room("shared"), Timestamp::new(1000)).await;
        registry.join(alice, room("solo"), Timestamp::new(1000)).await;

        // when (操作):
        let left = registry.leave_all(&alice).await;

        // then (期待する結果):
        assert_eq!(left.len(), 2);
        assert_eq!(registry.members(&room("shared")).await, vec![bob]);
        assert!(registry.members(&room("solo")).await.is_empty());
        assert!(registry.rooms_of(&alice).await.is_empty());
        let keys: Vec<_> = registry
            .list_rooms()
            .await
            .into_iter()
            .map(|summary| summary.key)
            .collect();
        assert_eq!(keys, vec![room("shared")]);
    }

    #[tokio::test]
    async fn test_leave_all_for_unknown_connection_is_noop() {
        // テスト項目: どのルームにも所属していない接続の leave_all は何もしない
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();

        // when (操作):
        let left = registry.leave_all(&ConnectionId::generate()).await;

        // then (期待する結果):
        assert!(left.is_empty());
        assert!(registry.list_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_members_of_unknown_room_is_empty() {
        // テスト項目: 存在しないルームのメンバー一覧は空
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();

        // when (操作):
        let members = registry.members(&room("nowhere")).await;

        // then (期待する結果):
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn test_rejoin_after_prune_recreates_room() {
        // テスト項目: 削除されたルームに再度 join すると新しい作成時刻で作り直される
        // given (前提条件):
        let registry = InMemoryRoomRegistry::new();
        let alice = ConnectionId::generate();
        registry.join(alice, room("r1"), Timestamp::new(1000)).await;
        registry.leave_all(&alice).await;

        // when (操作):
        registry.join(alice, room("r1"), Timestamp::new(5000)).await;

        // then (期待する結果):
        let rooms = registry.list_rooms().await;
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].created_at, Timestamp::new(5000));
    }
}
