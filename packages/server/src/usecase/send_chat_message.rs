//! UseCase: `chat:message`
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatMessageUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 送信者自身を含むルームの全メンバーに届くこと（自分の UI も同じ経路で描画するため）
//! - サーバーが付与したタイムスタンプと送信者 ID が載ること
//! - 同じ送信者からの連続したメッセージが送信順に届くこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人のルームでの送信
//! - エッジケース：誰もいないルームへの送信、別ルームのメンバー
//! - 異常系：空のルーム ID

use std::sync::Arc;

use serde_json::Value;
use taskflow_shared::time::Clock;

use crate::domain::{ChatMessage, ConnectionId, RoomKey, ServerEvent, Timestamp};

use super::{broadcast::RoomBroadcaster, error::RoomEventError};

/// Send a chat message to a room, echoing it to the sender
pub struct SendChatMessageUseCase {
    broadcaster: Arc<RoomBroadcaster>,
    clock: Arc<dyn Clock>,
}

impl SendChatMessageUseCase {
    pub fn new(broadcaster: Arc<RoomBroadcaster>, clock: Arc<dyn Clock>) -> Self {
        Self { broadcaster, clock }
    }

    /// Stamp the message and broadcast it to every member of `room_id`,
    /// sender included.
    ///
    /// Returns the number of recipients.
    pub async fn execute(
        &self,
        sender: ConnectionId,
        room_id: String,
        message: Value,
    ) -> Result<usize, RoomEventError> {
        let room = RoomKey::new(room_id)?;
        let chat_message =
            ChatMessage::new(sender, message, Timestamp::new(self.clock.now_millis()));

        let delivered = self
            .broadcaster
            .broadcast(&room, &ServerEvent::ChatMessage(chat_message), None)
            .await?;

        tracing::debug!(
            "Chat message from '{}' delivered to {} member(s) of '{}'",
            sender,
            delivered,
            room
        );
        Ok(delivered)
    }
}
