//! UseCase: connection setup
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectConnectionUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 接続ごとに一意な ID が払い出され、MessagePusher に登録されることを保証する
//! - 接続直後に自分の ID を知らせる connected イベントが届くことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続
//! - エッジケース：同時に複数の接続

use std::sync::Arc;

use taskflow_shared::time::Clock;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, ServerEvent, Timestamp};

use super::error::ConnectError;

/// Identity assigned to a freshly upgraded connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectedConnection {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
}

/// Connection setup use case
pub struct ConnectConnectionUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectConnectionUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// Assign an identifier to a new connection, register its outbound
    /// channel and queue the `connected` greeting on it.
    pub async fn execute(&self, sender: PusherChannel) -> Result<ConnectedConnection, ConnectError> {
        let connection = ConnectedConnection {
            id: ConnectionId::generate(),
            connected_at: Timestamp::new(self.clock.now_millis()),
        };

        self.message_pusher
            .register_client(connection.id, sender)
            .await;
        self.message_pusher
            .push_to(&connection.id, &ServerEvent::Connected(connection.id))
            .await?;

        Ok(connection)
    }
}
