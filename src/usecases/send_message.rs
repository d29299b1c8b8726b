//! Validation and construction of an outgoing chat message.
//!
//! The session treats every rejection here as a silent no-op: nothing is
//! queued, nothing is surfaced to the user.

use uuid::Uuid;

use crate::domain::{events::ConnectivityStatus, message::ChatMessage, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// Text is empty after trimming whitespace.
    EmptyMessage,
    /// No conversation is open to address the message to.
    NoActiveConversation,
    /// The live channel is not connected; the message is dropped, not
    /// queued.
    NotConnected,
}

/// Builds the optimistic outgoing message, or says why there is nothing to
/// send. On success the message carries a fresh correlation id so a later
/// server echo can be matched and suppressed.
pub fn prepare_outgoing(
    sender_id: UserId,
    receiver_id: Option<UserId>,
    connectivity: ConnectivityStatus,
    text: &str,
) -> Result<ChatMessage, SendMessageError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SendMessageError::EmptyMessage);
    }

    let receiver_id = receiver_id.ok_or(SendMessageError::NoActiveConversation)?;

    if connectivity != ConnectivityStatus::Connected {
        return Err(SendMessageError::NotConnected);
    }

    Ok(ChatMessage {
        sender_id,
        receiver_id,
        content: trimmed.to_owned(),
        timestamp_unix_ms: None,
        correlation_id: Some(Uuid::new_v4().to_string()),
    })
}
