//! Reconnection decisions.
//!
//! Pure functions, kept apart from the session so they can be tested without
//! a server.

use crate::error::ClientError;

/// Whether the error rules out any retry.
///
/// A rejected handshake (wrong path, server refusing upgrades) will not
/// change by trying again.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::Rejected(_) | ClientError::ReconnectExhausted(_)
    )
}

/// Whether the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - Reconnection attempts made so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
