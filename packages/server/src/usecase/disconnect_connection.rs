//! UseCase: connection teardown
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectConnectionUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断した接続がすべてのルームから暗黙的に抜けることを保証する
//! - 切断後のブロードキャストがエラーにならないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：チャットルームと通知トピックに所属した接続の切断
//! - エッジケース：どのルームにも所属していない接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomKey, RoomRegistry};

/// Connection teardown use case
pub struct DisconnectConnectionUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectConnectionUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Leave every room and drop the outbound channel.
    ///
    /// Returns the rooms the connection was a member of.
    pub async fn execute(&self, connection_id: ConnectionId) -> Vec<RoomKey> {
        let rooms = self.registry.leave_all(&connection_id).await;
        self.message_pusher.unregister_client(&connection_id).await;
        rooms
    }
}
