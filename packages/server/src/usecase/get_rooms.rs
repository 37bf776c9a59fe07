//! UseCase: list live rooms

use std::sync::Arc;

use crate::domain::{RoomRegistry, RoomSummary};

pub struct GetRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self) -> Vec<RoomSummary> {
        self.registry.list_rooms().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockRoomRegistry, RoomKey, Timestamp};

    #[tokio::test]
    async fn test_get_rooms_returns_registry_summaries() {
        // テスト項目: レジストリのルーム一覧がそのまま返される
        // given (前提条件):
        let summary = RoomSummary {
            key: RoomKey::new("r1".to_string()).unwrap(),
            members: 3,
            created_at: Timestamp::new(1000),
        };
        let expected = summary.clone();
        let mut registry = MockRoomRegistry::new();
        registry
            .expect_list_rooms()
            .times(1)
            .returning(move || vec![summary.clone()]);
        let usecase = GetRoomsUseCase::new(Arc::new(registry));

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(rooms, vec![expected]);
    }
}
