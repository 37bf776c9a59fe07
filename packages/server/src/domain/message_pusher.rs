//! Message pusher port: delivery of server events to connections.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, ServerEvent};

/// Outbound channel of one connection; carries encoded frames.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register the outbound channel of a new connection
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Forget a connection's outbound channel
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// Push an event to a single connection
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// Push an event to every target, skipping targets that are gone.
    ///
    /// Returns how many targets the event was handed to.
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &ServerEvent,
    ) -> Result<usize, MessagePushError>;
}
